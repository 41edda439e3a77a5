//! HTTP(S) dataset source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use geoquiz_core::model::Dataset;

use crate::error::DataLoadError;
use crate::source::{parse_dataset, DatasetSource};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches the dataset with a single GET request. No retries.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self, DataLoadError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(url: &str, timeout_secs: u64) -> Result<Self, DataLoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DataLoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Dataset, DataLoadError> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                DataLoadError::Timeout {
                    url: self.url.clone(),
                    secs: self.timeout_secs,
                }
            } else if e.is_connect() {
                DataLoadError::Network(format!("{} not reachable: {e}", self.url))
            } else {
                DataLoadError::Network(e.to_string())
            }
        };

        let response = self.client.get(&self.url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataLoadError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;
        parse_dataset(&bytes, &self.url)
    }
}
