//! Errors returned by drawing commands.

use crate::models::DrawingMode;
use thiserror::Error;

/// A drawing command was rejected. The store state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawingError {
    /// The command is not valid in the current session state
    #[error("cannot {command} while session is {mode}")]
    InvalidTransition {
        command: &'static str,
        mode: SessionState,
    },
    /// Polygon insertion index outside `0..=route_len`
    #[error("insertion index {index} is outside 0..={route_len}")]
    OutOfRange { index: i64, route_len: usize },
    /// Polygon import with too few captured vertices
    #[error("polygon needs at least {required} points, captured {actual}")]
    InsufficientPoints { required: usize, actual: usize },
    /// Point added while no capture is taking points
    #[error("no capture is taking points")]
    NotCapturing,
}

/// Session state reported in [`DrawingError::InvalidTransition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Capturing(DrawingMode),
    Paused,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => f.write_str("idle"),
            SessionState::Capturing(mode) => write!(f, "capturing a {mode}"),
            SessionState::Paused => f.write_str("holding a paused polygon"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawingError>;
