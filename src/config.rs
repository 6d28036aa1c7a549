//! Configuration resolution
//!
//! Per-key priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The environment tier is handled by clap: a flag left unset on the command
//! line falls back to its environment variable before the lower tiers apply.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

const DEFAULT_MODEL_DIR: &str = "model";

/// Default listen address when no tier provides one
fn default_bind() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5728)
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Command-line interface
#[derive(Debug, Default, Parser)]
#[command(
    name = "feedback-sentiment",
    about = "Customer feedback sentiment classification service"
)]
pub struct Cli {
    /// Directory holding classifier.json, vectorizer.json and stopwords.txt
    #[arg(long, env = "FEEDBACK_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Socket address to listen on
    #[arg(long, env = "FEEDBACK_BIND")]
    pub bind: Option<SocketAddr>,

    /// Explicit TOML config file (otherwise the platform config directory is searched)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Keys accepted in the TOML config file
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub model_dir: Option<PathBuf>,
    pub bind: Option<SocketAddr>,
}

impl FileConfig {
    /// Load an explicitly named config file. Unlike the default lookup, a
    /// named file that cannot be read is an error.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Look for a config file in the platform config directory. A missing
    /// file is not an error; a present but malformed one is.
    fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = dirs::config_dir()
            .map(|dir| dir.join("feedback-sentiment").join("config.toml"))
        else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        info!("Config file: {}", path.display());
        Self::load(&path)
    }
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the model artifacts are loaded from
    pub model_dir: PathBuf,
    /// Listen address
    pub bind: SocketAddr,
}

impl Settings {
    /// Resolve settings across all configuration tiers
    pub fn resolve(cli: Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => {
                info!("Config file: {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::load_default()?,
        };

        let model_dir = cli
            .model_dir
            .or(file.model_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));
        let bind = cli.bind.or(file.bind).unwrap_or_else(default_bind);

        Ok(Self { model_dir, bind })
    }

    /// Path of the serialized classifier artifact
    pub fn classifier_path(&self) -> PathBuf {
        self.model_dir.join("classifier.json")
    }

    /// Path of the serialized vectorizer artifact
    pub fn vectorizer_path(&self) -> PathBuf {
        self.model_dir.join("vectorizer.json")
    }

    /// Path of the stopword list
    pub fn stopwords_path(&self) -> PathBuf {
        self.model_dir.join("stopwords.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn cli_beats_config_file() {
        let (_dir, path) = write_config("model_dir = \"/from/file\"\nbind = \"0.0.0.0:9000\"\n");
        let cli = Cli {
            model_dir: Some(PathBuf::from("/from/cli")),
            bind: None,
            config: Some(path),
        };

        let settings = Settings::resolve(cli).unwrap();
        assert_eq!(settings.model_dir, PathBuf::from("/from/cli"));
        assert_eq!(settings.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn config_file_beats_default() {
        let (_dir, path) = write_config("model_dir = \"/from/file\"\n");
        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };

        let settings = Settings::resolve(cli).unwrap();
        assert_eq!(settings.model_dir, PathBuf::from("/from/file"));
        assert_eq!(settings.bind, default_bind());
    }

    #[test]
    fn empty_config_file_falls_through_to_defaults() {
        let (_dir, path) = write_config("");
        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };

        let settings = Settings::resolve(cli).unwrap();
        assert_eq!(settings.model_dir, PathBuf::from(DEFAULT_MODEL_DIR));
        assert_eq!(settings.bind, default_bind());
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/config.toml")),
            ..Cli::default()
        };

        assert!(matches!(
            Settings::resolve(cli),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let (_dir, path) = write_config("model_dir = [not toml");
        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };

        assert!(matches!(
            Settings::resolve(cli),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn artifact_paths_derive_from_model_dir() {
        let settings = Settings {
            model_dir: PathBuf::from("/models/feedback"),
            bind: default_bind(),
        };

        assert_eq!(
            settings.classifier_path(),
            PathBuf::from("/models/feedback/classifier.json")
        );
        assert_eq!(
            settings.vectorizer_path(),
            PathBuf::from("/models/feedback/vectorizer.json")
        );
        assert_eq!(
            settings.stopwords_path(),
            PathBuf::from("/models/feedback/stopwords.txt")
        );
    }
}
