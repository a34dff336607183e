//! Request and result types for the prediction bridge
//!
//! The predictor prints a single JSON object carrying its own `success`
//! discriminant. Decoding validates that shape into a tagged union instead of
//! passing the raw object through; anything malformed becomes a decode error
//! that the engine folds into a generic Failure.

use crate::error::{BridgeError, BridgeResult};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single prediction request. Constructed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    player_name: String,
    stat: String,
}

impl PredictionRequest {
    /// Build a request, trimming both fields. Returns `None` when either is
    /// blank; the caller decides how to surface that (HTTP 400, CLI usage).
    pub fn new(player_name: &str, stat: &str) -> Option<Self> {
        let player_name = player_name.trim();
        let stat = stat.trim();
        if player_name.is_empty() || stat.is_empty() {
            return None;
        }
        Some(Self {
            player_name: player_name.to_string(),
            stat: stat.to_string(),
        })
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn stat(&self) -> &str {
        &self.stat
    }
}

/// Predicted value range
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StatRange {
    pub min: f64,
    pub max: f64,
}

/// Body of a successful prediction (matches the predictor's JSON output)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionSuccess {
    pub player: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_stat: Option<String>,
    pub prediction: f64,
    pub confidence: f64,
    pub range: StatRange,
    pub mae: f64,
    pub data_points: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_used: Option<u64>,
}

/// Body of a failed prediction
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PredictionFailure {
    pub error: String,
}

/// Result of one prediction call: exactly one of Success or Failure
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Success(PredictionSuccess),
    Failure(PredictionFailure),
}

impl PredictionResult {
    /// Shorthand for a Failure with the given message
    pub fn failure(error: impl Into<String>) -> Self {
        PredictionResult::Failure(PredictionFailure {
            error: error.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResult::Success(_))
    }

    /// Decode one JSON line from the predictor.
    ///
    /// The `success` field must be present and boolean. A success body must
    /// carry the full numeric payload; a failure body needs only `error`
    /// (missing message falls back to a generic one).
    pub fn from_json_line(line: &str) -> BridgeResult<Self> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| BridgeError::MalformedOutput(e.to_string()))?;

        let success = value
            .get("success")
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                BridgeError::MalformedOutput("missing boolean `success` field".to_string())
            })?;

        if success {
            let body: PredictionSuccess = serde_json::from_value(value)
                .map_err(|e| BridgeError::MalformedOutput(e.to_string()))?;
            Ok(PredictionResult::Success(body))
        } else {
            let error = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            Ok(PredictionResult::Failure(PredictionFailure { error }))
        }
    }
}

/// Wire shape: the `success` discriminant flattened alongside the body
#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for PredictionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PredictionResult::Success(body) => Tagged {
                success: true,
                body,
            }
            .serialize(serializer),
            PredictionResult::Failure(body) => Tagged {
                success: false,
                body,
            }
            .serialize(serializer),
        }
    }
}
