//! CSV parsing for worldscope sources
//!
//! Parses raw payload bytes into a `DataFrame`. The upstream datasets are
//! comma-separated with a header row; schema is inferred by polars and
//! validated against the configured column map by wsc-core afterwards.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::{Error, Result};

/// Rows scanned for schema inference. The demographics table mixes sparse
/// early-century rows with dense modern ones, so a shallow scan misreads
/// numeric columns as strings.
const INFER_SCHEMA_ROWS: usize = 1000;

/// Parse an in-memory CSV payload into a `DataFrame`
///
/// Fails with [`Error::NotTabular`] when the payload is visibly not
/// delimited text (an HTML error page from a misbehaving source) and with
/// [`Error::Parse`] when polars cannot parse it into rows.
pub fn read_csv_bytes(data: &[u8]) -> Result<DataFrame> {
    if looks_like_markup(data) {
        return Err(Error::NotTabular(
            "payload starts with markup, expected delimited text".to_string(),
        ));
    }

    let parse_options = CsvParseOptions::default().with_separator(b',');

    let read_options = CsvReadOptions::default()
        .with_parse_options(parse_options)
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS));

    let reader = CsvReader::new(Cursor::new(data)).with_options(read_options);

    let df = reader
        .finish()
        .map_err(|e| Error::Parse(format!("invalid CSV payload: {e}")))?;

    log::debug!("parsed CSV payload: {} rows, {} columns", df.height(), df.width());

    Ok(df)
}

/// Parse a CSV file on the local filesystem into a `DataFrame`
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<DataFrame> {
    let data = std::fs::read(path.as_ref())?;
    read_csv_bytes(&data)
}

/// Cheap sniff for HTML/XML error pages served with a 200 status
fn looks_like_markup(data: &[u8]) -> bool {
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'<')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_bytes() {
        let data = b"country,year,population\nSweden,2000,8872000\nSweden,2001,8888000\n";
        let df = read_csv_bytes(data).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        assert!(df.column("country").is_ok());
    }

    #[test]
    fn test_markup_payload_is_not_tabular() {
        let data = b"<!DOCTYPE html><html><body>404</body></html>";
        let err = read_csv_bytes(data).unwrap_err();
        assert!(matches!(err, Error::NotTabular(_)));
    }

    #[test]
    fn test_markup_detection_skips_whitespace() {
        assert!(looks_like_markup(b"  \n\t<html>"));
        assert!(!looks_like_markup(b"country,year\nX,2000\n"));
    }

    #[test]
    fn test_read_csv_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a,b\n1,2\n").unwrap();

        let df = read_csv_path(file.path()).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 2);
    }
}
