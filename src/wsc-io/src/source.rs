//! Source location dispatch
//!
//! A source location is either an HTTP(S) URL, handled by the wsc-io-https
//! plugin, or a local filesystem path. Local paths exist so integration
//! tests and offline runs can point the pipeline at files on disk.

use polars::prelude::DataFrame;

use crate::csv::read_csv_bytes;
use crate::{Error, Result};

/// Fetch the raw payload for a source location
pub async fn fetch_source(location: &str) -> Result<Vec<u8>> {
    #[cfg(feature = "http")]
    if wsc_io_https::is_http_url(location) {
        return Ok(wsc_io_https::fetch_http(location).await?);
    }

    #[cfg(not(feature = "http"))]
    if location.starts_with("http://") || location.starts_with("https://") {
        return Err(Error::Fetch(format!(
            "HTTP support disabled, cannot fetch {location}"
        )));
    }

    std::fs::read(location)
        .map_err(|e| Error::Fetch(format!("failed to read source {location}: {e}")))
}

/// Fetch and parse a source location into a `DataFrame`
pub async fn read_source(location: &str) -> Result<DataFrame> {
    let payload = fetch_source(location).await?;
    read_csv_bytes(&payload)
}

/// Synchronous version of [`read_source`] for callers without a runtime
#[cfg(feature = "http")]
pub fn read_source_sync(location: &str) -> Result<DataFrame> {
    if wsc_io_https::is_http_url(location) {
        let payload = wsc_io_https::fetch_http_sync(location)?;
        return read_csv_bytes(&payload);
    }
    let payload =
        std::fs::read(location).map_err(|e| Error::Fetch(format!("failed to read source {location}: {e}")))?;
    read_csv_bytes(&payload)
}

/// Synchronous version of [`read_source`] for callers without a runtime
#[cfg(not(feature = "http"))]
pub fn read_source_sync(location: &str) -> Result<DataFrame> {
    let payload =
        std::fs::read(location).map_err(|e| Error::Fetch(format!("failed to read source {location}: {e}")))?;
    read_csv_bytes(&payload)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_source_sync_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"country,year\nNorway,1999\nNorway,2000\n")
            .unwrap();

        let df = read_source_sync(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_missing_path_is_fetch_error() {
        let err = read_source_sync("/no/such/source.csv").unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
