//! Typesetting for the small LaTeX subset the game produces
//!
//! Understands `\frac{..}{..}`, `\sqrt{..}`, `\pi`, braces and plain characters.
//! Large sizes stack fractions over a bar across three rows:
//!
//! ```text
//!     4π
//! sin(──)
//!     3
//! ```
//!
//! Small sizes flatten everything onto one row (`sin(4π/3)`), which is what food
//! labels use since they must fit a couple of cells.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use super::TextColor;

/// Font sizes at or above this stack fractions
pub const DISPLAY_SIZE: u16 = 24;
/// Font sizes at or above this render bold
pub const BOLD_SIZE: u16 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("unknown command \\{command} in {source_text:?}")]
    UnknownCommand {
        command: String,
        source_text: String,
    },

    #[error("\\{command} expects a braced argument in {source_text:?}")]
    MissingArgument {
        command: String,
        source_text: String,
    },

    #[error("unbalanced braces in {0:?}")]
    UnbalancedBraces(String),
}

/// Turns symbolic text into an image
pub trait Rasterizer {
    type Image;
    type Error;

    fn rasterize(&mut self, text: &str, size: u16, color: TextColor)
        -> Result<Self::Image, Self::Error>;
}

/// Pre-rendered block of glyph rows, every row `width` characters wide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathImage {
    pub rows: Vec<String>,
    pub width: u16,
    pub color: TextColor,
    pub bold: bool,
}

impl MathImage {
    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }
}

/// Rasterizer producing terminal glyph blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalMath {
    pub display_size: u16,
}

impl Default for TerminalMath {
    fn default() -> Self {
        Self {
            display_size: DISPLAY_SIZE,
        }
    }
}

impl Rasterizer for TerminalMath {
    type Image = MathImage;
    type Error = MathError;

    fn rasterize(&mut self, text: &str, size: u16, color: TextColor) -> Result<MathImage, MathError> {
        let node = parse(text)?;

        let block = if size >= self.display_size {
            Block::layout(&node)
        } else {
            Block::text(&inline(&node))
        };

        Ok(MathImage {
            width: block.width as u16,
            rows: block.rows,
            color,
            bold: size >= BOLD_SIZE,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Frac(Box<Node>, Box<Node>),
    Sqrt(Box<Node>),
    Row(Vec<Node>),
}

fn parse(source: &str) -> Result<Node, MathError> {
    let mut parser = Parser {
        chars: source.chars().peekable(),
        source,
    };
    parser.row(false)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    source: &'a str,
}

impl Parser<'_> {
    /// Nodes up to the closing brace (when `nested`) or end of input
    fn row(&mut self, nested: bool) -> Result<Node, MathError> {
        let mut nodes = Vec::new();

        loop {
            match self.chars.next() {
                None if nested => return Err(self.unbalanced()),
                None => break,
                Some('}') if nested => break,
                Some('}') => return Err(self.unbalanced()),
                Some('{') => nodes.push(self.row(true)?),
                Some('\\') => nodes.push(self.command()?),
                Some(c) if c.is_whitespace() => {}
                Some(c) => push_char(&mut nodes, c),
            }
        }

        Ok(match nodes.len() {
            1 => nodes.remove(0),
            _ => Node::Row(nodes),
        })
    }

    fn command(&mut self) -> Result<Node, MathError> {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            self.chars.next();
        }

        match name.as_str() {
            "pi" => Ok(Node::Text("π".to_string())),
            "frac" => {
                let numerator = self.argument(&name)?;
                let denominator = self.argument(&name)?;
                Ok(Node::Frac(Box::new(numerator), Box::new(denominator)))
            }
            "sqrt" => Ok(Node::Sqrt(Box::new(self.argument(&name)?))),
            _ => Err(MathError::UnknownCommand {
                command: name,
                source_text: self.source.to_string(),
            }),
        }
    }

    fn argument(&mut self, command: &str) -> Result<Node, MathError> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}

        if self.chars.next_if_eq(&'{').is_none() {
            return Err(MathError::MissingArgument {
                command: command.to_string(),
                source_text: self.source.to_string(),
            });
        }
        self.row(true)
    }

    fn unbalanced(&self) -> MathError {
        MathError::UnbalancedBraces(self.source.to_string())
    }
}

fn push_char(nodes: &mut Vec<Node>, c: char) {
    if let Some(Node::Text(text)) = nodes.last_mut() {
        text.push(c);
    } else {
        nodes.push(Node::Text(c.to_string()));
    }
}

/// One-row rendering: `\frac{\sqrt{3}}{2}` becomes `√3/2`
fn inline(node: &Node) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::Row(nodes) => nodes.iter().map(inline).collect(),
        Node::Frac(numerator, denominator) => {
            format!("{}/{}", grouped(numerator), grouped(denominator))
        }
        Node::Sqrt(inner) => {
            let inner = inline(inner);
            if inner.chars().count() == 1 {
                format!("√{inner}")
            } else {
                format!("√({inner})")
            }
        }
    }
}

/// Parenthesize a fraction operand that would otherwise read ambiguously
fn grouped(node: &Node) -> String {
    let text = inline(node);
    if text.contains('/') {
        format!("({text})")
    } else {
        text
    }
}

/// Rectangular block of rows with a baseline row used for vertical alignment
#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    rows: Vec<String>,
    width: usize,
    baseline: usize,
}

impl Block {
    fn text(text: &str) -> Self {
        Self {
            rows: vec![text.to_string()],
            width: text.chars().count(),
            baseline: 0,
        }
    }

    fn layout(node: &Node) -> Self {
        match node {
            Node::Text(text) => Self::text(text),
            Node::Row(nodes) => Self::beside(nodes.iter().map(Self::layout).collect()),
            Node::Frac(numerator, denominator) => {
                Self::stacked(Self::layout(numerator), Self::layout(denominator))
            }
            Node::Sqrt(inner) => Self::root(Self::layout(inner)),
        }
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn descent(&self) -> usize {
        self.height() - self.baseline - 1
    }

    /// Blocks side by side, baselines aligned
    fn beside(parts: Vec<Block>) -> Self {
        let ascent = parts.iter().map(|b| b.baseline).max().unwrap_or(0);
        let descent = parts.iter().map(Block::descent).max().unwrap_or(0);
        let height = ascent + descent + 1;

        let mut rows = vec![String::new(); height];
        for part in &parts {
            let offset = ascent - part.baseline;
            for (r, row) in rows.iter_mut().enumerate() {
                match r.checked_sub(offset).and_then(|i| part.rows.get(i)) {
                    Some(line) => row.push_str(line),
                    None => row.push_str(&" ".repeat(part.width)),
                }
            }
        }

        Self {
            rows,
            width: parts.iter().map(|b| b.width).sum(),
            baseline: ascent,
        }
    }

    /// Numerator over a bar over denominator; the bar is the baseline
    fn stacked(numerator: Block, denominator: Block) -> Self {
        let width = numerator.width.max(denominator.width);
        let baseline = numerator.height();

        let mut rows: Vec<String> = numerator
            .rows
            .iter()
            .map(|row| center(row, numerator.width, width))
            .collect();
        rows.push("─".repeat(width));
        rows.extend(
            denominator
                .rows
                .iter()
                .map(|row| center(row, denominator.width, width)),
        );

        Self {
            rows,
            width,
            baseline,
        }
    }

    /// Radical sign in front of the baseline row
    fn root(inner: Block) -> Self {
        let rows = inner
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let sign = if r == inner.baseline { '√' } else { ' ' };
                format!("{sign}{row}")
            })
            .collect();

        Self {
            rows,
            width: inner.width + 1,
            baseline: inner.baseline,
        }
    }
}

/// Pad `row` (of `row_width` characters) to `width`, centered, extra space on the right
fn center(row: &str, row_width: usize, width: usize) -> String {
    let left = (width - row_width) / 2;
    let right = width - row_width - left;
    format!("{}{row}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(text: &str) -> Vec<String> {
        TerminalMath::default()
            .rasterize(text, 32, TextColor::White)
            .unwrap()
            .rows
    }

    fn small(text: &str) -> String {
        let image = TerminalMath::default()
            .rasterize(text, 14, TextColor::Yellow)
            .unwrap();
        assert_eq!(image.rows.len(), 1);
        image.rows[0].clone()
    }

    #[test]
    fn test_inline_values() {
        assert_eq!(small(r"\frac{\sqrt{3}}{2}"), "√3/2");
        assert_eq!(small(r"-\frac{1}{\sqrt{3}}"), "-1/√3");
        assert_eq!(small(r"\sqrt{3}"), "√3");
        assert_eq!(small("0"), "0");
        assert_eq!(small(r"sin(\frac{4\pi}{3})"), "sin(4π/3)");
        assert_eq!(small(r"\frac{\pi}{2}"), "π/2");
    }

    #[test]
    fn test_inline_groups_nested_fractions() {
        assert_eq!(small(r"\frac{\frac{1}{2}}{3}"), "(1/2)/3");
        assert_eq!(small(r"\sqrt{12}"), "√(12)");
    }

    #[test]
    fn test_display_fraction() {
        assert_eq!(display(r"\frac{\sqrt{3}}{2}"), vec!["√3", "──", "2 "]);
    }

    #[test]
    fn test_display_question() {
        assert_eq!(
            display(r"sin(\frac{4\pi}{3})"),
            vec!["    4π ", "sin(──)", "    3  "]
        );
    }

    #[test]
    fn test_display_signed_value_aligns_on_bar() {
        assert_eq!(display(r"-\frac{1}{2}"), vec![" 1", "-─", " 2"]);
    }

    #[test]
    fn test_display_rows_share_width() {
        let image = TerminalMath::default()
            .rasterize(r"tan(\frac{11\pi}{6})", 32, TextColor::White)
            .unwrap();
        assert_eq!(image.height(), 3);
        assert!(image.bold);
        for row in &image.rows {
            assert_eq!(row.chars().count(), image.width as usize);
        }
    }

    #[test]
    fn test_parse_errors() {
        let mut math = TerminalMath::default();
        assert!(matches!(
            math.rasterize(r"\cos{x}", 14, TextColor::White),
            Err(MathError::UnknownCommand { .. })
        ));
        assert!(matches!(
            math.rasterize(r"\frac{1}", 14, TextColor::White),
            Err(MathError::MissingArgument { .. })
        ));
        assert!(matches!(
            math.rasterize(r"\sqrt{3", 14, TextColor::White),
            Err(MathError::UnbalancedBraces(_))
        ));
        assert!(matches!(
            math.rasterize("1}", 14, TextColor::White),
            Err(MathError::UnbalancedBraces(_))
        ));
    }
}
