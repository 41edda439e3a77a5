//! Configuration loading and dataset source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geoquiz_core::generator::{
    GeneratorConfig, DEFAULT_MAX_SAMPLING_ATTEMPTS, DEFAULT_QUESTION_COUNT,
};

use crate::file::FileSource;
use crate::http::{HttpSource, DEFAULT_TIMEOUT_SECS};
use crate::source::DatasetSource;

/// Environment variable that overrides the configured dataset location.
pub const DATASET_ENV_VAR: &str = "GEOQUIZ_DATASET";

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatasetConfig {
    File {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

impl DatasetConfig {
    /// Interpret a path or URL given on the command line.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetConfig::Http {
                url: location.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }
        } else {
            DatasetConfig::File {
                path: PathBuf::from(location),
            }
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig::File {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/countries.json")
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}
fn default_max_attempts() -> usize {
    DEFAULT_MAX_SAMPLING_ATTEMPTS
}

/// Top-level geoquiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoquizConfig {
    /// Dataset location.
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Questions per quiz.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Draw limit for distractor and subject sampling.
    #[serde(default = "default_max_attempts")]
    pub max_sampling_attempts: usize,
    /// Fixed RNG seed for reproducible quizzes.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeoquizConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            question_count: default_question_count(),
            max_sampling_attempts: default_max_attempts(),
            seed: None,
        }
    }
}

impl GeoquizConfig {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            question_count: self.question_count,
            max_sampling_attempts: self.max_sampling_attempts,
        }
    }

    /// Reject values that would make every quiz fail.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.question_count >= 1, "question_count must be at least 1");
        anyhow::ensure!(
            self.max_sampling_attempts >= 3,
            "max_sampling_attempts must be at least 3"
        );
        if let DatasetConfig::Http { timeout_secs, .. } = &self.dataset {
            anyhow::ensure!(*timeout_secs >= 1, "timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_dataset_config(config: &DatasetConfig) -> DatasetConfig {
    match config {
        DatasetConfig::File { path } => DatasetConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        DatasetConfig::Http { url, timeout_secs } => DatasetConfig::Http {
            url: resolve_env_vars(url),
            timeout_secs: *timeout_secs,
        },
    }
}

/// Replace the dataset location when an override is present.
fn apply_dataset_override(config: &mut GeoquizConfig, location: Option<String>) {
    if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
        tracing::debug!(%location, "dataset location overridden from environment");
        config.dataset = DatasetConfig::from_location(location.trim());
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `geoquiz.toml` in the current directory
/// 2. `~/.config/geoquiz/config.toml`
///
/// Environment variable override: `GEOQUIZ_DATASET`.
pub fn load_config() -> Result<GeoquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GeoquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("geoquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => GeoquizConfig::default(),
    };

    apply_dataset_override(&mut config, std::env::var(DATASET_ENV_VAR).ok());
    config.dataset = resolve_dataset_config(&config.dataset);
    config.validate()?;

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GeoquizConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<GeoquizConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("geoquiz"))
}

/// Create a dataset source from its configuration.
pub fn create_source(config: &DatasetConfig) -> Result<Box<dyn DatasetSource>> {
    match config {
        DatasetConfig::File { path } => Ok(Box::new(FileSource::new(path))),
        DatasetConfig::Http { url, timeout_secs } => {
            Ok(Box::new(HttpSource::with_timeout(url, *timeout_secs)?))
        }
    }
}
