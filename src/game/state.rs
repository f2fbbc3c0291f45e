use std::fmt;

use super::action::Direction;
use super::question::{Food, Question};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Largest per-axis distance to `other`
    pub fn chebyshev_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Center of this cell in logical pixels
    pub fn pixel_center(&self, cell_size: f32) -> (f32, f32) {
        (
            self.x as f32 * cell_size + cell_size / 2.0,
            self.y as f32 * cell_size + cell_size / 2.0,
        )
    }

    /// Euclidean distance between the pixel centers of two cells
    pub fn pixel_distance(&self, other: Position, cell_size: f32) -> f32 {
        let (ax, ay) = self.pixel_center(cell_size);
        let (bx, by) = other.pixel_center(cell_size);
        (ax - bx).hypot(ay - by)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(body: Vec<Position>, direction: Direction) -> Self {
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Cell the head moves into on the next step
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Whether `pos` is any segment, tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head cell
    pub fn push_head(&mut self, pos: Position) {
        self.body.insert(0, pos);
    }

    /// Drop the last segment, keeping the length constant after a `push_head`
    pub fn retract_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Lives ran out after wrong answers
    OutOfLives,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndReason::Wall => "hit the wall",
            EndReason::SelfCollision => "ran into itself",
            EndReason::OutOfLives => "out of lives",
        };
        f.write_str(text)
    }
}

/// State of one play session, from Play until Game Over
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub question: Question,
    pub foods: Vec<Food>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub lives: u32,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        question: Question,
        foods: Vec<Food>,
        grid_width: usize,
        grid_height: usize,
        lives: u32,
    ) -> Self {
        Self {
            snake,
            question,
            foods,
            grid_width,
            grid_height,
            lives,
            score: 0,
            steps: 0,
            is_alive: true,
            end_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// The food bearing the current question's answer, if it is still on the board
    pub fn correct_food(&self) -> Option<&Food> {
        self.foods.iter().find(|food| food.is_correct)
    }

    pub fn end(&mut self, reason: EndReason) {
        self.is_alive = false;
        self.end_reason = Some(reason);
    }
}
