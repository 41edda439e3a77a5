//! Subcommand implementations and the settings they share.

use std::path::Path;

use anyhow::Result;

use geoquiz_core::generator::QuestionGenerator;
use geoquiz_core::model::Dataset;
use geoquiz_data::config::{create_source, load_config_from, DatasetConfig, GeoquizConfig};
use geoquiz_data::load_dataset;

pub mod generate;
pub mod init;
pub mod play;
pub mod validate;

/// Load config, then apply command-line overrides on top.
pub fn resolve_config(
    config_path: Option<&Path>,
    dataset: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
) -> Result<GeoquizConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(location) = dataset {
        config.dataset = DatasetConfig::from_location(&location);
    }
    if let Some(count) = count {
        config.question_count = count;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    tracing::debug!(
        dataset = ?config.dataset,
        questions = config.question_count,
        seed = ?config.seed,
        "configuration resolved"
    );
    Ok(config)
}

/// Fetch the configured dataset once.
pub async fn fetch_dataset(dataset: &DatasetConfig) -> Result<Dataset> {
    let source = create_source(dataset)?;
    Ok(load_dataset(source.as_ref()).await?)
}

pub fn make_generator(config: &GeoquizConfig) -> QuestionGenerator {
    match config.seed {
        Some(seed) => QuestionGenerator::seeded(seed, config.generator_config()),
        None => QuestionGenerator::from_entropy(config.generator_config()),
    }
}
