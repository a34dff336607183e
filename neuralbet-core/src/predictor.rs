//! Predictor engine
//!
//! Spawns the external predictor process and folds whatever happens into a
//! [`PredictionResult`]. The caller-facing contract is "this call cannot fail
//! loudly": every failure mode resolves to a Failure with a generic message.
//! Raw process output is logged for operators and never surfaced to callers.
//!
//! The predictor prints diagnostic lines before its single JSON result line,
//! so stdout is scanned from the last line backward for the first line shaped
//! like a JSON object.

use crate::error::{BridgeError, BridgeResult};
use crate::result::{PredictionRequest, PredictionResult};
use async_trait::async_trait;
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// Caller-safe message for a predictor that exited non-zero
pub const EXEC_FAILED: &str = "Prediction script execution failed";
/// Caller-safe message for output that yielded no usable JSON result
pub const PARSE_FAILED: &str = "Failed to parse prediction result";
/// Caller-safe message for a process that could not be started
pub const SPAWN_FAILED: &str = "Failed to start prediction process";

/// What one finished (or failed-to-start) predictor run produced
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability seam for launching the predictor.
///
/// Production uses [`TokioRunner`]; tests substitute a fake so no real
/// process is spawned.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<ProcessOutcome>;
}

/// Real runner backed by `tokio::process`.
///
/// Stdin is disabled (the predictor never reads input); stdout and stderr are
/// accumulated unbounded until the process exits.
pub struct TokioRunner;

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<ProcessOutcome> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(ProcessOutcome {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Where the predictor lives and how to invoke it
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Interpreter binary (e.g. `python3`)
    pub python: PathBuf,
    /// Predictor script, passed as the first argument
    pub script: PathBuf,
    /// Working directory for the spawned process. The predictor resolves its
    /// data files relative to this root.
    pub resource_root: PathBuf,
}

/// Engine that turns a (player, stat) pair into a [`PredictionResult`]
pub struct PredictorEngine {
    config: PredictorConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl PredictorEngine {
    pub fn new(config: PredictorConfig) -> Self {
        Self::with_runner(config, Arc::new(TokioRunner))
    }

    pub fn with_runner(config: PredictorConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }

    /// Run one prediction.
    ///
    /// Spawns exactly one predictor process per call and waits for it to
    /// finish. There is no timeout and no cancellation: a hung predictor
    /// hangs the call. Every failure mode resolves to a Failure value, never
    /// an error; the raw detail is logged here and only a generic message
    /// reaches the caller.
    pub async fn predict(&self, req: &PredictionRequest) -> PredictionResult {
        match self.run_predictor(req).await {
            Ok(result) => result,
            Err(e) => {
                let message = match &e {
                    BridgeError::Spawn(_) => SPAWN_FAILED,
                    BridgeError::NonZeroExit(_) => EXEC_FAILED,
                    _ => PARSE_FAILED,
                };
                PredictionResult::failure(message)
            }
        }
    }

    async fn run_predictor(&self, req: &PredictionRequest) -> BridgeResult<PredictionResult> {
        let args = vec![
            self.config.script.display().to_string(),
            req.player_name().to_string(),
            req.stat().to_string(),
        ];

        debug!(
            "Spawning predictor: {} {:?} (cwd {})",
            self.config.python.display(),
            args,
            self.config.resource_root.display()
        );

        let outcome = self
            .runner
            .run(&self.config.python, &args, &self.config.resource_root)
            .await
            .map_err(|e| {
                error!("Failed to spawn {}: {}", self.config.python.display(), e);
                BridgeError::Spawn(e)
            })?;

        if !outcome.exited_cleanly() {
            error!(
                "Predictor exited with code {:?}; stderr: {}; stdout: {}",
                outcome.exit_code,
                outcome.stderr.trim(),
                outcome.stdout.trim()
            );
            return Err(BridgeError::NonZeroExit(outcome.exit_code));
        }

        let Some(line) = extract_json_line(&outcome.stdout) else {
            error!("No JSON line in predictor output: {}", outcome.stdout.trim());
            return Err(BridgeError::MissingJsonLine);
        };

        PredictionResult::from_json_line(line).map_err(|e| {
            error!("Bad predictor output ({}); raw stdout: {}", e, outcome.stdout.trim());
            e
        })
    }
}

/// Scan stdout from the last line backward for the first line that looks
/// like a single JSON object. Tolerates diagnostic lines printed before the
/// result line.
fn extract_json_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{') && line.ends_with('}'))
}
