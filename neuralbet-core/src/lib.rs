//! NeuralBet Core Library
//!
//! This library provides the prediction bridge for Gaucho NeuralBet.
//! It delegates the actual statistical forecast to an external predictor
//! process and normalizes whatever comes back into a tagged result.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │  Rust callers   │────▶│ PredictorEngine  │────▶│  predictor       │
//! │ (server / cli)  │     │ (this crate)     │spawn│  (python script) │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                                 │
//!                                 ▼
//!                   PredictionResult (Success | Failure)
//! ```
//!
//! # Modules
//!
//! - [`predictor`] - Engine that spawns the external predictor process
//! - [`result`] - Request and tagged result types
//! - [`stat`] - Stat code enumeration
//! - [`error`] - Error types

pub mod error;
pub mod predictor;
pub mod result;
pub mod stat;

pub use error::{BridgeError, BridgeResult};
pub use predictor::{PredictorConfig, PredictorEngine, ProcessOutcome, ProcessRunner, TokioRunner};
pub use result::{PredictionFailure, PredictionRequest, PredictionResult, PredictionSuccess, StatRange};
pub use stat::StatCode;
