//! Shared application state
//!
//! Constructed once at startup from an explicit [`Config`]; handlers receive
//! it through axum's `State` extractor. The store and engine sit behind
//! `Arc`s so tests can substitute doubles.

use crate::config::Config;
use crate::users::UserStore;
use neuralbet_core::PredictorEngine;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub engine: Arc<PredictorEngine>,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        engine: Arc<PredictorEngine>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            users,
            engine,
        })
    }
}
