//! HTTP API handlers

pub mod feedback;
pub mod health;

pub use feedback::{analyze_feedback, feedback_routes};
pub use health::{health_check, health_routes};

/// GET /
///
/// Plain-text greeting
pub async fn home() -> &'static str {
    "Hello, World!"
}
