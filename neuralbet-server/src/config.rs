//! Environment configuration
//!
//! Read once at startup and passed to components explicitly; nothing here is
//! ambient global state. A missing `DATABASE_URL` is fatal; everything else
//! has a development default.

use anyhow::{bail, Result};
use neuralbet_core::PredictorConfig;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Fallback signing secret, matching the original deployment's behavior of
/// warning and continuing rather than refusing to start.
const DEV_JWT_SECRET: &str = "your-secret-key";

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Postgres connection string. Required.
    pub database_url: String,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// How to invoke the external predictor
    pub predictor: PredictorConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse()?,
            Err(_) => 5001,
        };

        let Ok(database_url) = env::var("DATABASE_URL") else {
            bail!("DATABASE_URL environment variable is not defined");
        };

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using development default");
            DEV_JWT_SECRET.to_string()
        });

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:5174".to_string(),
                    "http://localhost:3000".to_string(),
                ]
            });

        let resource_root =
            PathBuf::from(env::var("PREDICTOR_ROOT").unwrap_or_else(|_| "./predictor".to_string()));
        let predictor = PredictorConfig {
            python: PathBuf::from(env::var("PYTHON_BIN").unwrap_or_else(|_| "python3".to_string())),
            script: PathBuf::from(
                env::var("PREDICTOR_SCRIPT")
                    .unwrap_or_else(|_| "nba_prediction_api.py".to_string()),
            ),
            resource_root,
        };

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            allowed_origins,
            predictor,
        })
    }
}

/// Config used by handler tests; never reads the environment
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "postgres://test".to_string(),
        jwt_secret: "test-secret".to_string(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
        predictor: PredictorConfig {
            python: PathBuf::from("python3"),
            script: PathBuf::from("nba_prediction_api.py"),
            resource_root: PathBuf::from("."),
        },
    }
}
