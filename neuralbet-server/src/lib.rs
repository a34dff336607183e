//! Gaucho NeuralBet API server
//!
//! HTTP boundary in front of two independent components: a credential store
//! (register/login, bcrypt-hashed passwords, signed session tokens) and the
//! prediction bridge from `neuralbet-core`. The two share no state; a router
//! delegates to one or the other and serializes the tagged result back as
//! JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────────┐
//! │  React app   │────▶│  axum router      │────▶│ PredictorEngine  │
//! │  (external)  │HTTP │  /api/nba/predict │     │ (neuralbet-core) │
//! └──────────────┘     │  /api/users/*     │     └──────────────────┘
//!                      │  /api/health      │     ┌──────────────────┐
//!                      └───────────────────┘────▶│ UserStore (sqlx) │
//!                                                └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`routes`] - Router construction and HTTP handlers
//! - [`users`] - User store trait and Postgres implementation
//! - [`auth`] - Password hashing and session token signing
//! - [`state`] - Shared application state
//! - [`config`] - Environment configuration
//! - [`error`] - HTTP error mapping

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod users;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
