//! The dataset source trait and shared decoding.

use async_trait::async_trait;
use tracing::info;

use geoquiz_core::model::Dataset;

use crate::error::DataLoadError;

/// Somewhere a country dataset can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable origin (a path or URL) for messages.
    fn describe(&self) -> String;

    /// Fetch and decode the dataset.
    async fn fetch(&self) -> Result<Dataset, DataLoadError>;
}

/// Decode a JSON array of country records.
pub fn parse_dataset(bytes: &[u8], origin: &str) -> Result<Dataset, DataLoadError> {
    let dataset: Dataset = serde_json::from_slice(bytes).map_err(|source| DataLoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    if dataset.is_empty() {
        return Err(DataLoadError::Empty(origin.to_string()));
    }
    Ok(dataset)
}

/// Fetch a dataset once, logging the outcome.
pub async fn load_dataset(source: &dyn DatasetSource) -> Result<Dataset, DataLoadError> {
    let origin = source.describe();
    match source.fetch().await {
        Ok(dataset) => {
            info!(%origin, records = dataset.len(), "dataset loaded");
            Ok(dataset)
        }
        Err(e) => {
            tracing::error!(%origin, error = %e, "failed to load dataset");
            Err(e)
        }
    }
}
