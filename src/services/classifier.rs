//! Fitted linear classifier
//!
//! The artifact is exported by the offline trainer as JSON: one coefficient
//! row and one intercept per class, plus the class code each row scores.
//! Prediction is a plain argmax over the class scores.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Classifier artifact and prediction errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Artifact file could not be read
    #[error("failed to read classifier artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not valid JSON of the expected shape
    #[error("failed to parse classifier artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but its contents are internally inconsistent
    #[error("classifier artifact is inconsistent: {0}")]
    Inconsistent(String),

    /// Feature vector does not match the fitted dimensionality
    #[error("feature vector has {actual} dimensions, classifier expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Fitted one-vs-rest linear classifier mapping a feature vector to an
/// integer class code
#[derive(Debug, Deserialize)]
pub struct LinearClassifier {
    /// Per-class coefficient rows, all of the fitted feature dimensionality
    coefficients: Vec<Vec<f32>>,
    /// Per-class intercepts
    intercepts: Vec<f32>,
    /// Class code scored by each row
    classes: Vec<i64>,
}

impl LinearClassifier {
    /// Create a classifier from fitted parameters, validating their shape
    pub fn new(
        coefficients: Vec<Vec<f32>>,
        intercepts: Vec<f32>,
        classes: Vec<i64>,
    ) -> Result<Self, ClassifierError> {
        let classifier = Self {
            coefficients,
            intercepts,
            classes,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Load and validate the classifier artifact
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let classifier: Self =
            serde_json::from_str(&raw).map_err(|source| ClassifierError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::Inconsistent(
                "classifier has no classes".to_string(),
            ));
        }
        if self.coefficients.len() != self.classes.len()
            || self.intercepts.len() != self.classes.len()
        {
            return Err(ClassifierError::Inconsistent(format!(
                "{} classes, {} coefficient rows, {} intercepts",
                self.classes.len(),
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }

        let width = self.coefficients[0].len();
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(ClassifierError::Inconsistent(
                "coefficient rows have differing lengths".to_string(),
            ));
        }
        Ok(())
    }

    /// Feature dimensionality the classifier was fitted on
    pub fn n_features(&self) -> usize {
        self.coefficients[0].len()
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Predict the class code for a feature vector: score each class as the
    /// dot product with its coefficient row plus its intercept and return
    /// the code of the highest-scoring class.
    pub fn predict(&self, features: &[f32]) -> Result<i64, ClassifierError> {
        if features.len() != self.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let mut best_class = self.classes[0];
        let mut best_score = f32::NEG_INFINITY;
        for (index, row) in self.coefficients.iter().enumerate() {
            let score = row
                .iter()
                .zip(features.iter())
                .map(|(weight, value)| weight * value)
                .sum::<f32>()
                + self.intercepts[index];
            if score > best_score {
                best_score = score;
                best_class = self.classes[index];
            }
        }
        Ok(best_class)
    }
}
