//! Core game logic module
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! the trigonometry tables, question and food generation, and the movement engine.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod question;
pub mod settings;
pub mod state;
pub mod trig;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, Pickup, StepInfo, StepResult};
pub use error::{GameError, GameResult};
pub use question::{Food, Question, QuestionGenerator};
pub use settings::Settings;
pub use state::{EndReason, GameState, Position, Snake};
pub use trig::{BaseAngle, Quadrant, TrigFunction};
