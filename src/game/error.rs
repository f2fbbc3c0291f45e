use thiserror::Error;

use super::trig::{BaseAngle, TrigFunction};

/// Failures raised by the game core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A base angle outside the function's table was requested
    #[error("{function} has no tabulated value at {angle}")]
    UnsupportedAngle {
        function: TrigFunction,
        angle: BaseAngle,
    },

    /// Settings leave no function or no quadrant to draw from
    #[error("no trig function or quadrant is enabled")]
    EmptySelection,

    /// No free interior cell was left for a food item
    #[error("no free cell for food after {attempts} attempts")]
    PlacementExhausted { attempts: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
