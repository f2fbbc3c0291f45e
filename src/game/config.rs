use std::f32::consts::SQRT_2;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Largest accepted grid side, in cells
pub const MAX_GRID_SIZE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Lives at the start of a round
    pub initial_lives: u32,

    // Food placement
    /// Cells kept free of food along every edge
    pub food_margin: usize,
    /// Minimum Chebyshev distance between two foods
    pub food_spacing: u32,
    /// Decoys generated alongside the correct answer
    pub max_distractors: usize,
    /// Random draws before placement falls back to a deterministic scan
    pub placement_attempts: usize,

    // Pickup geometry, measured in logical pixels
    /// Side of one grid cell
    pub cell_size_px: f32,
    /// Head-to-food center distance under which the food is eaten; must stay
    /// under the cell diagonal so only orthogonal neighbours are in reach
    pub pickup_radius_px: f32,

    // Pacing
    /// Milliseconds per movement step while playing
    pub play_tick_ms: u64,
    /// Milliseconds per frame on menu screens
    pub menu_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 20,
            initial_snake_length: 1,
            initial_lives: 3,
            food_margin: 3,
            food_spacing: 3,
            max_distractors: 3,
            placement_attempts: 512,
            cell_size_px: 20.0,
            pickup_radius_px: 25.0,
            play_tick_ms: 100,
            menu_tick_ms: 33,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(16, 16)
    }

    pub fn play_tick(&self) -> Duration {
        Duration::from_millis(self.play_tick_ms)
    }

    pub fn menu_tick(&self) -> Duration {
        Duration::from_millis(self.menu_tick_ms)
    }

    /// Check that a round can actually be played on this configuration
    pub fn validate(&self) -> GameResult<()> {
        let interior = |dim: usize| dim.saturating_sub(self.food_margin.saturating_mul(2));

        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "a {}x{} grid exceeds the {MAX_GRID_SIZE}-cell limit per side",
                self.grid_width, self.grid_height
            )));
        }

        if interior(self.grid_width) == 0 || interior(self.grid_height) == 0 {
            return Err(GameError::InvalidConfig(format!(
                "a {}x{} grid leaves no room for food inside a {}-cell margin",
                self.grid_width, self.grid_height, self.food_margin
            )));
        }

        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial_snake_length must be positive".to_string(),
            ));
        }

        if self.initial_snake_length > self.grid_width / 2 {
            return Err(GameError::InvalidConfig(format!(
                "initial_snake_length {} does not fit behind the center of a {}-wide grid",
                self.initial_snake_length, self.grid_width
            )));
        }

        // the starting snake may cover interior cells; one must stay free for food
        if interior(self.grid_width) * interior(self.grid_height) <= self.initial_snake_length {
            return Err(GameError::InvalidConfig(format!(
                "a {}x{} grid has no free cell for food next to a {}-cell snake",
                self.grid_width, self.grid_height, self.initial_snake_length
            )));
        }

        if self.initial_lives == 0 {
            return Err(GameError::InvalidConfig(
                "initial_lives must be positive".to_string(),
            ));
        }

        if self.cell_size_px <= 0.0 || self.pickup_radius_px <= 0.0 {
            return Err(GameError::InvalidConfig(
                "cell_size_px and pickup_radius_px must be positive".to_string(),
            ));
        }

        let diagonal = self.cell_size_px * SQRT_2;
        if self.pickup_radius_px >= diagonal {
            return Err(GameError::InvalidConfig(format!(
                "pickup_radius_px {} must be under the cell diagonal {diagonal:.2}",
                self.pickup_radius_px
            )));
        }

        if self.placement_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "placement_attempts must be positive".to_string(),
            ));
        }

        if self.play_tick_ms == 0 || self.menu_tick_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick intervals must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
