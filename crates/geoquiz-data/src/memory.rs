//! In-memory source for tests and embedding.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use geoquiz_core::model::Dataset;

use crate::error::DataLoadError;
use crate::source::DatasetSource;

/// A source that hands out a fixed dataset, or fails if it is empty.
pub struct MemorySource {
    dataset: Dataset,
    fetch_count: AtomicU32,
}

impl MemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DatasetSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self) -> Result<Dataset, DataLoadError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        if self.dataset.is_empty() {
            return Err(DataLoadError::Empty(self.describe()));
        }
        Ok(self.dataset.clone())
    }
}
