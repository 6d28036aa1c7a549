//! API request/response types and the sentiment label

use serde::{Deserialize, Serialize};

/// Sentiment category assigned to a piece of feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Unhappy,
    Neutral,
    Happy,
}

impl Sentiment {
    /// Map a classifier class code to its label. Codes outside the fixed
    /// table {0, 1, 2} have no label.
    pub fn from_class_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Sentiment::Unhappy),
            1 => Some(Sentiment::Neutral),
            2 => Some(Sentiment::Happy),
            _ => None,
        }
    }

    /// Label as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Unhappy => "unhappy",
            Sentiment::Neutral => "neutral",
            Sentiment::Happy => "happy",
        }
    }
}

/// Body of POST /analyze_feedback. The field is optional so that a missing
/// key parses and can be rejected as a validation failure rather than a
/// deserialization one.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: Option<String>,
}

/// Successful analysis response: the submitted text echoed byte-identically
/// plus the derived label
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub sentiment: Sentiment,
}
