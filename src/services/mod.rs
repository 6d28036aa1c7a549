//! Inference pipeline services

pub mod analyzer;
pub mod classifier;
pub mod normalizer;
pub mod vectorizer;

pub use analyzer::{AnalyzeError, ArtifactError, SentimentAnalyzer};
pub use classifier::LinearClassifier;
pub use normalizer::TextNormalizer;
pub use vectorizer::TfidfVectorizer;
