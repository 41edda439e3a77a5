//! Dataset load error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching or parsing a dataset.
///
/// None of these are retried; the quiz cannot start until the source is fixed.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The dataset file could not be read.
    #[error("failed to read dataset file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with an error status.
    #[error("dataset request to {url} failed (HTTP {status})")]
    Http { url: String, status: u16 },

    /// The request timed out.
    #[error("dataset request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The payload is not a JSON array of country records.
    #[error("malformed dataset from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed but holds no records.
    #[error("dataset from {0} contains no records")]
    Empty(String),
}
