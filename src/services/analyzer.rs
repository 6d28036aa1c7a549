//! Sentiment inference pipeline
//!
//! Composes the normalizer, vectorizer and classifier into the single
//! analyze operation the HTTP handler calls. Artifact loading is fail-fast:
//! every artifact is read and validated before the service starts serving.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::services::classifier::{ClassifierError, LinearClassifier};
use crate::services::normalizer::{StopwordError, TextNormalizer};
use crate::services::vectorizer::{TfidfVectorizer, VectorizerError};
use crate::types::Sentiment;

/// Startup artifact loading failures. These abort the process before the
/// listener binds.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Stopwords(#[from] StopwordError),

    #[error(transparent)]
    Vectorizer(#[from] VectorizerError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Vectorizer and classifier were fitted on different dimensionalities
    #[error("classifier expects {classifier} features but vectorizer produces {vectorizer}")]
    DimensionMismatch {
        classifier: usize,
        vectorizer: usize,
    },
}

/// Per-request inference failures, surfaced to the caller as HTTP 500
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    Predict(#[from] ClassifierError),

    /// Classifier returned a code outside the fixed label table
    #[error("classifier returned unknown class code {0}")]
    UnknownClassCode(i64),
}

/// The loaded inference pipeline: normalize, vectorize, classify, label
pub struct SentimentAnalyzer {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
}

impl SentimentAnalyzer {
    /// Assemble a pipeline from already-loaded parts, cross-checking that
    /// the classifier was fitted on the vectorizer's dimensionality
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: TfidfVectorizer,
        classifier: LinearClassifier,
    ) -> Result<Self, ArtifactError> {
        if classifier.n_features() != vectorizer.dimension() {
            return Err(ArtifactError::DimensionMismatch {
                classifier: classifier.n_features(),
                vectorizer: vectorizer.dimension(),
            });
        }
        Ok(Self {
            normalizer,
            vectorizer,
            classifier,
        })
    }

    /// Load all artifacts from the configured model directory
    pub fn load(settings: &Settings) -> Result<Self, ArtifactError> {
        Self::load_from(
            &settings.stopwords_path(),
            &settings.vectorizer_path(),
            &settings.classifier_path(),
        )
    }

    /// Load all artifacts from explicit paths
    pub fn load_from(
        stopwords: &Path,
        vectorizer: &Path,
        classifier: &Path,
    ) -> Result<Self, ArtifactError> {
        let normalizer = TextNormalizer::from_file(stopwords)?;
        info!("✓ Loaded {} stopwords", normalizer.stop_word_count());

        let vectorizer = TfidfVectorizer::from_file(vectorizer)?;
        info!("✓ Loaded vectorizer ({} features)", vectorizer.dimension());

        let classifier = LinearClassifier::from_file(classifier)?;
        info!("✓ Loaded classifier ({} classes)", classifier.n_classes());

        Self::new(normalizer, vectorizer, classifier)
    }

    /// Classify a raw feedback string
    pub fn analyze(&self, feedback: &str) -> Result<Sentiment, AnalyzeError> {
        let processed = self.normalizer.normalize(feedback);
        let features = self.vectorizer.transform(&processed);
        let code = self.classifier.predict(&features)?;
        Sentiment::from_class_code(code).ok_or(AnalyzeError::UnknownClassCode(code))
    }
}
