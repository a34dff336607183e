//! HTTP error mapping
//!
//! Each variant fixes both a status code and a body shape. The user routes
//! answer with `{message}` bodies while the prediction route answers with
//! `{success:false, error}` bodies, matching the two response families the
//! frontend consumes. Backend detail is logged, never returned.

use crate::users::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Prediction request missing playerName or stat
    #[error("Player name and stat are required")]
    MissingPredictionFields,

    /// The bridge produced a Failure
    #[error("{0}")]
    PredictionFailed(String),

    /// Registration with an email that already has an account
    #[error("User already exists")]
    UserExists,

    /// Login against an unknown email
    #[error("User not found")]
    UserNotFound,

    /// Login with a wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration with a blank name, email, or password
    #[error("Name, email and password are required")]
    MissingCredentials,

    /// User store failure
    #[error("Server error")]
    Store(#[source] StoreError),

    /// Password hashing failure
    #[error("Server error")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token signing failure
    #[error("Server error")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => ApiError::UserExists,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingPredictionFields => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": self.to_string() }),
            ),
            ApiError::PredictionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "error": msg }),
            ),
            ApiError::UserExists | ApiError::InvalidCredentials | ApiError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, json!({ "message": self.to_string() }))
            }
            ApiError::UserNotFound => {
                (StatusCode::NOT_FOUND, json!({ "message": self.to_string() }))
            }
            ApiError::Store(e) => {
                error!("User store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }
            ApiError::Hash(e) => {
                error!("Password hashing error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }
            ApiError::Token(e) => {
                error!("Token signing error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
