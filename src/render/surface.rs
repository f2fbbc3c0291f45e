//! Drawing primitives over a grid of terminal cells
//!
//! Coordinates are terminal columns and rows. A cell is roughly twice as tall as
//! it is wide, so round shapes halve their horizontal offsets.

use ratatui::buffer::Buffer;
use ratatui::style::{Modifier, Style};

use crate::app::Area;

use super::math::MathImage;
use super::TextColor;

pub trait DrawSurface {
    /// Columns and rows available
    fn size(&self) -> (u16, u16);

    fn fill_rect(&mut self, area: Area, color: TextColor);

    /// Square-cornered outline
    fn stroke_rect(&mut self, area: Area, color: TextColor);

    /// Round-cornered outline, optionally filled inside
    fn rounded_rect(&mut self, area: Area, fill: Option<TextColor>, border: TextColor);

    fn circle(&mut self, center: (u16, u16), radius: u16, color: TextColor, filled: bool);

    /// Filled polygon; cells whose centers fall inside are painted
    fn polygon(&mut self, points: &[(u16, u16)], color: TextColor);

    fn line_strip(&mut self, points: &[(u16, u16)], color: TextColor);

    /// Copy a pre-rendered image with its top-left corner at (x, y)
    fn blit(&mut self, image: &MathImage, x: u16, y: u16);

    fn text(&mut self, x: u16, y: u16, text: &str, color: TextColor, bold: bool);

    /// Finish the frame. The terminal flushes after the draw closure returns, so
    /// buffer-backed surfaces have nothing to do here.
    fn present(&mut self) {}
}

/// [`DrawSurface`] writing into a ratatui frame buffer
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self { buf }
    }

    /// Write one glyph; anything outside the buffer is clipped
    fn put(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    fn put_char(&mut self, x: i32, y: i32, c: char, style: Style) {
        let mut utf8 = [0; 4];
        self.put(x, y, c.encode_utf8(&mut utf8), style);
    }

    fn outline(&mut self, area: Area, style: Style, corners: [char; 4]) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let (left, top) = (i32::from(area.x), i32::from(area.y));
        let right = left + i32::from(area.width) - 1;
        let bottom = top + i32::from(area.height) - 1;

        for x in left + 1..right {
            self.put(x, top, "─", style);
            self.put(x, bottom, "─", style);
        }
        for y in top + 1..bottom {
            self.put(left, y, "│", style);
            self.put(right, y, "│", style);
        }
        let [tl, tr, bl, br] = corners;
        self.put_char(left, top, tl, style);
        self.put_char(right, top, tr, style);
        self.put_char(left, bottom, bl, style);
        self.put_char(right, bottom, br, style);
    }

    fn line(&mut self, from: (u16, u16), to: (u16, u16), style: Style) {
        // Bresenham
        let (mut x, mut y) = (i32::from(from.0), i32::from(from.1));
        let (x1, y1) = (i32::from(to.0), i32::from(to.1));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, "•", style);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

fn fg(color: TextColor) -> Style {
    Style::default().fg(color.into())
}

/// Even-odd test against the polygon's edges
fn inside(points: &[(u16, u16)], px: f32, py: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (f32::from(points[i].0), f32::from(points[i].1));
        let (xj, yj) = (f32::from(points[j].0), f32::from(points[j].1));
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl DrawSurface for BufferSurface<'_> {
    fn size(&self) -> (u16, u16) {
        (self.buf.area.width, self.buf.area.height)
    }

    fn fill_rect(&mut self, area: Area, color: TextColor) {
        let style = Style::default().bg(color.into());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.put(i32::from(x), i32::from(y), " ", style);
            }
        }
    }

    fn stroke_rect(&mut self, area: Area, color: TextColor) {
        self.outline(area, fg(color), ['┌', '┐', '└', '┘']);
    }

    fn rounded_rect(&mut self, area: Area, fill: Option<TextColor>, border: TextColor) {
        if let Some(fill) = fill {
            self.fill_rect(area, fill);
        }
        let mut style = fg(border);
        if let Some(fill) = fill {
            style = style.bg(fill.into());
        }
        self.outline(area, style, ['╭', '╮', '╰', '╯']);
    }

    fn circle(&mut self, center: (u16, u16), radius: u16, color: TextColor, filled: bool) {
        let style = fg(color);
        let (cx, cy) = (i32::from(center.0), i32::from(center.1));
        let r = i32::from(radius);
        let radius = f32::from(radius);

        for y in cy - r..=cy + r {
            for x in cx - 2 * r..=cx + 2 * r {
                let dx = (x - cx) as f32 / 2.0;
                let dy = (y - cy) as f32;
                let distance = dx.hypot(dy);
                let hit = if filled {
                    distance <= radius
                } else {
                    (distance - radius).abs() < 0.5
                };
                if hit {
                    self.put(x, y, if filled { "█" } else { "·" }, style);
                }
            }
        }
    }

    fn polygon(&mut self, points: &[(u16, u16)], color: TextColor) {
        if points.len() < 3 {
            return;
        }
        let style = fg(color);
        let min_x = points.iter().map(|p| p.0).min().unwrap_or(0);
        let max_x = points.iter().map(|p| p.0).max().unwrap_or(0);
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if inside(points, f32::from(x) + 0.5, f32::from(y) + 0.5) {
                    self.put(i32::from(x), i32::from(y), "░", style);
                }
            }
        }
    }

    fn line_strip(&mut self, points: &[(u16, u16)], color: TextColor) {
        let style = fg(color);
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], style);
        }
    }

    fn blit(&mut self, image: &MathImage, x: u16, y: u16) {
        let mut style = fg(image.color);
        if image.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        for (r, row) in image.rows.iter().enumerate() {
            let row_y = i32::from(y) + r as i32;
            for (c, glyph) in row.chars().enumerate() {
                // Transparent background: padding spaces leave the cell alone
                if glyph != ' ' {
                    self.put_char(i32::from(x) + c as i32, row_y, glyph, style);
                }
            }
        }
    }

    fn text(&mut self, x: u16, y: u16, text: &str, color: TextColor, bold: bool) {
        let mut style = fg(color);
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        for (c, glyph) in text.chars().enumerate() {
            self.put_char(i32::from(x) + c as i32, i32::from(y), glyph, style);
        }
    }
}
