//! Feedback analysis endpoint

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use crate::error::{ApiError, ApiResult};
use crate::types::{FeedbackRequest, FeedbackResponse};
use crate::AppState;

const MISSING_FEEDBACK: &str = "No feedback provided";

/// POST /analyze_feedback
///
/// Classify one feedback text and echo it back with its sentiment label.
/// The body is taken as raw bytes and parsed explicitly so that every
/// malformed request produces the same fixed validation response.
pub async fn analyze_feedback(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<FeedbackResponse>> {
    let feedback = extract_feedback(&body)?;

    let sentiment = state
        .analyzer
        .analyze(&feedback)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::debug!(sentiment = sentiment.as_str(), "Feedback classified");

    Ok(Json(FeedbackResponse {
        feedback,
        sentiment,
    }))
}

/// Validate the request body: it must be a JSON object carrying a string
/// `feedback` value. An unparseable body, a missing key, and a non-string
/// value are all the same caller error.
fn extract_feedback(body: &[u8]) -> Result<String, ApiError> {
    serde_json::from_slice::<FeedbackRequest>(body)
        .ok()
        .and_then(|request| request.feedback)
        .ok_or_else(|| ApiError::BadRequest(MISSING_FEEDBACK.to_string()))
}

/// Build feedback analysis routes
pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/analyze_feedback", post(analyze_feedback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_string_feedback_value() {
        let feedback = extract_feedback(br#"{"feedback": "works great"}"#).unwrap();
        assert_eq!(feedback, "works great");
    }

    #[test]
    fn accepts_the_empty_string() {
        let feedback = extract_feedback(br#"{"feedback": ""}"#).unwrap();
        assert_eq!(feedback, "");
    }

    #[test]
    fn rejects_a_missing_key() {
        assert!(extract_feedback(b"{}").is_err());
    }

    #[test]
    fn rejects_null_and_non_string_values() {
        assert!(extract_feedback(br#"{"feedback": null}"#).is_err());
        assert!(extract_feedback(br#"{"feedback": 42}"#).is_err());
        assert!(extract_feedback(br#"{"feedback": ["a"]}"#).is_err());
        assert!(extract_feedback(br#"{"feedback": {"text": "a"}}"#).is_err());
    }

    #[test]
    fn rejects_unparseable_bodies() {
        assert!(extract_feedback(b"").is_err());
        assert!(extract_feedback(b"not json").is_err());
        assert!(extract_feedback(b"null").is_err());
        assert!(extract_feedback(&[0xff, 0xfe]).is_err());
    }
}
