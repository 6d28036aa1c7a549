//! Fitted TF-IDF vectorizer
//!
//! The artifact is exported by the offline trainer as JSON: a vocabulary
//! mapping each term to its feature column and a per-column inverse document
//! frequency vector. The service never fits; it only transforms.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Vectorizer artifact errors
#[derive(Debug, Error)]
pub enum VectorizerError {
    /// Artifact file could not be read
    #[error("failed to read vectorizer artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not valid JSON of the expected shape
    #[error("failed to parse vectorizer artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but its contents are internally inconsistent
    #[error("vectorizer artifact is inconsistent: {0}")]
    Inconsistent(String),
}

/// Fitted TF-IDF transform mapping a normalized document to a
/// fixed-dimension feature vector
#[derive(Debug, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> feature column assignments from fitting
    vocabulary: HashMap<String, usize>,
    /// Per-column inverse document frequency weights
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Create a vectorizer from fitted parameters, validating their shape
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f32>,
    ) -> Result<Self, VectorizerError> {
        let vectorizer = Self { vocabulary, idf };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Load and validate the vectorizer artifact
    pub fn from_file(path: &Path) -> Result<Self, VectorizerError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VectorizerError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let vectorizer: Self =
            serde_json::from_str(&raw).map_err(|source| VectorizerError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<(), VectorizerError> {
        if self.idf.is_empty() {
            return Err(VectorizerError::Inconsistent(
                "idf vector is empty".to_string(),
            ));
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(VectorizerError::Inconsistent(format!(
                "vocabulary has {} terms but idf has {} entries",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        let mut assigned = vec![false; self.idf.len()];
        for (term, &column) in &self.vocabulary {
            if column >= self.idf.len() {
                return Err(VectorizerError::Inconsistent(format!(
                    "term {term:?} maps to column {column}, outside the {} idf entries",
                    self.idf.len()
                )));
            }
            if assigned[column] {
                return Err(VectorizerError::Inconsistent(format!(
                    "column {column} is assigned to more than one term"
                )));
            }
            assigned[column] = true;
        }
        Ok(())
    }

    /// Number of feature columns
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Transform a normalized document into its TF-IDF feature vector.
    ///
    /// Term counts are weighted by IDF and the result is L2-normalized,
    /// matching how the artifact was fitted. Terms outside the vocabulary
    /// contribute nothing; a document with no known terms (including the
    /// empty document) maps to the all-zero vector.
    pub fn transform(&self, document: &str) -> Vec<f32> {
        let mut features = vec![0.0f32; self.idf.len()];
        for token in document.split_whitespace() {
            if let Some(&column) = self.vocabulary.get(token) {
                features[column] += self.idf[column];
            }
        }

        let norm = features.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(terms: &[&str]) -> HashMap<String, usize> {
        terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect()
    }

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::new(
            vocabulary(&["bad", "good", "product"]),
            vec![2.0, 1.5, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn transform_weights_and_normalizes() {
        let v = vectorizer();
        let features = v.transform("good product");

        assert_eq!(features.len(), 3);
        assert_eq!(features[0], 0.0);
        // Unit length after L2 normalization
        let norm: f32 = features.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        // IDF ordering survives normalization
        assert!(features[1] > features[2]);
    }

    #[test]
    fn repeated_terms_accumulate() {
        let v = vectorizer();
        let once = v.transform("bad product");
        let twice = v.transform("bad bad product");
        // More "bad" mass shifts the normalized vector toward column 0
        assert!(twice[0] > once[0]);
        assert!(twice[2] < once[2]);
    }

    #[test]
    fn unknown_terms_yield_zero_vector() {
        let v = vectorizer();
        assert_eq!(v.transform("entirely novel words"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_document_yields_zero_vector() {
        let v = vectorizer();
        assert_eq!(v.transform(""), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_out_of_range_column() {
        let result = TfidfVectorizer::new(vocabulary(&["bad"]), vec![]);
        assert!(matches!(result, Err(VectorizerError::Inconsistent(_))));

        let mut vocab = vocabulary(&["bad", "good"]);
        vocab.insert("worse".to_string(), 7);
        let result = TfidfVectorizer::new(vocab, vec![1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(VectorizerError::Inconsistent(_))));
    }

    #[test]
    fn rejects_duplicate_column_assignment() {
        let mut vocab = HashMap::new();
        vocab.insert("bad".to_string(), 0);
        vocab.insert("good".to_string(), 0);
        let result = TfidfVectorizer::new(vocab, vec![1.0, 1.0]);
        assert!(matches!(result, Err(VectorizerError::Inconsistent(_))));
    }

    #[test]
    fn rejects_vocabulary_idf_size_mismatch() {
        let result = TfidfVectorizer::new(vocabulary(&["bad", "good"]), vec![1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(VectorizerError::Inconsistent(_))));
    }

    #[test]
    fn loads_from_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        std::fs::write(
            &path,
            r#"{"vocabulary": {"bad": 0, "good": 1}, "idf": [1.2, 3.4]}"#,
        )
        .unwrap();

        let v = TfidfVectorizer::from_file(&path).unwrap();
        assert_eq!(v.dimension(), 2);
    }

    #[test]
    fn malformed_artifact_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            TfidfVectorizer::from_file(&path),
            Err(VectorizerError::Parse { .. })
        ));
    }

    #[test]
    fn missing_artifact_is_a_read_error() {
        assert!(matches!(
            TfidfVectorizer::from_file(Path::new("/nonexistent/vectorizer.json")),
            Err(VectorizerError::Read { .. })
        ));
    }
}
