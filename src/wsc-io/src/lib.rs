//! wsc-io: Source I/O for worldscope
//!
//! This crate turns a configured source location into a polars `DataFrame`.
//! A location is either an HTTP(S) URL (the normal case - both upstream
//! datasets are remote CSV files) or a local filesystem path, which keeps the
//! pipeline testable without a network.
//!
//! Format parsing is CSV-only: every upstream variant serves delimited text
//! with a header row.
//!
//! # Examples
//!
//! ```rust,ignore
//! use wsc_io::read_source;
//!
//! let df = read_source("https://example.com/gapminder.csv").await.unwrap();
//! ```

pub mod csv;
pub mod source;

pub use csv::{read_csv_bytes, read_csv_path};
pub use source::{fetch_source, read_source, read_source_sync};

/// Result type alias for source I/O operations
pub type Result<T> = std::result::Result<T, Error>;

/// Source I/O error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
    #[error("Fetch error: {0}")]
    Fetch(String),
    #[error("Non-tabular payload: {0}")]
    NotTabular(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(feature = "http")]
impl From<wsc_io_https::Error> for Error {
    fn from(e: wsc_io_https::Error) -> Self {
        Error::Fetch(e.to_string())
    }
}
