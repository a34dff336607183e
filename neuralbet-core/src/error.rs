//! Error types for the prediction bridge
//!
//! These classify what went wrong for logging and the CLI; the engine's
//! public contract folds every class into a caller-safe Failure value.

use thiserror::Error;

/// Main error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The predictor process could not be started
    #[error("Failed to spawn predictor: {0}")]
    Spawn(#[from] std::io::Error),

    /// The predictor exited with a non-zero status (or died on a signal)
    #[error("Predictor exited with code {0:?}")]
    NonZeroExit(Option<i32>),

    /// Predictor stdout contained no JSON result line
    #[error("No JSON result line in predictor output")]
    MissingJsonLine,

    /// Predictor emitted a JSON line that does not decode to a result
    #[error("Malformed predictor output: {0}")]
    MalformedOutput(String),

    /// Unknown stat code
    #[error("Unknown stat code: {0}")]
    UnknownStat(String),
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
