//! geoquiz-data: Dataset sources and configuration.
//!
//! Implements the `DatasetSource` trait for local files, HTTP URLs and
//! in-memory datasets, and loads `geoquiz.toml` configuration.

pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod memory;
pub mod source;

pub use config::{create_source, load_config, DatasetConfig, GeoquizConfig};
pub use error::DataLoadError;
pub use source::{load_dataset, parse_dataset, DatasetSource};
