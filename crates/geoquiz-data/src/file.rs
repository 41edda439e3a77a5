//! Local JSON file source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use geoquiz_core::model::Dataset;

use crate::error::DataLoadError;
use crate::source::{parse_dataset, DatasetSource};

/// Reads the dataset from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Dataset, DataLoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DataLoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_dataset(&bytes, &self.describe())
    }
}
