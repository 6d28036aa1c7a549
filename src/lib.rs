//! feedback-sentiment - Feedback Sentiment Service
//!
//! Classifies free-text customer feedback into one of three sentiment
//! categories (unhappy, neutral, happy) using a pre-trained TF-IDF +
//! linear classifier pipeline. The fitted artifacts are produced by an
//! offline training process and loaded once at startup; the service itself
//! never trains or mutates them.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use services::analyzer::SentimentAnalyzer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Inference pipeline, loaded once at startup and read-only afterwards
    pub analyzer: Arc<SentimentAnalyzer>,
}

impl AppState {
    /// Create new application state
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .merge(api::feedback_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
