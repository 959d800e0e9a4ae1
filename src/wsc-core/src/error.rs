use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Result type alias for worldscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for worldscope operations
///
/// `load` errors (`Fetch`, `Parse`, `Schema`, `JoinCardinality`) are
/// unrecoverable for the invocation that raised them; there is no
/// partial-success mode apart from the documented happiness degradation in
/// [`crate::dataset`].
#[derive(Debug)]
pub enum Error {
    /// Network or HTTP failure while fetching a source, including
    /// non-tabular payloads served with a success status
    Fetch(String),

    /// Malformed tabular payload that cannot be parsed into rows
    Parse(String),

    /// Expected source column missing after fetch
    Schema {
        /// Which configured source the column was expected in
        source: String,
        /// The missing column name as configured
        column: String,
    },

    /// Happiness-side join key occurs more than once; a left join would
    /// fan out demographics rows instead of preserving them
    JoinCardinality {
        /// Country component of the duplicated key
        country: String,
        /// Year component of the duplicated key
        year: i64,
    },

    /// No rows to compute a maximum year over
    EmptyTable,

    /// I/O errors (file operations, etc.)
    Io(io::Error),

    /// Polars errors (`DataFrame` operations)
    Polars(polars::error::PolarsError),

    /// Configuration errors
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch(msg) => write!(f, "Fetch error: {msg}"),
            Error::Parse(msg) => write!(f, "Parse error: {msg}"),
            Error::Schema { source, column } => {
                write!(f, "Schema error: column '{column}' missing from {source} source")
            }
            Error::JoinCardinality { country, year } => {
                write!(
                    f,
                    "Join cardinality error: happiness key ({country}, {year}) is not unique"
                )
            }
            Error::EmptyTable => write!(f, "Empty table: no rows to slice"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Polars(e) => write!(f, "DataFrame error: {e}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Polars(e) => Some(e),
            _ => None,
        }
    }
}

// Conversion implementations
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(e: polars::error::PolarsError) -> Self {
        Error::Polars(e)
    }
}

impl From<wsc_io::Error> for Error {
    fn from(e: wsc_io::Error) -> Self {
        match e {
            wsc_io::Error::Io(e) => Error::Io(e),
            wsc_io::Error::Polars(e) => Error::Polars(e),
            wsc_io::Error::Fetch(msg) | wsc_io::Error::NotTabular(msg) => Error::Fetch(msg),
            wsc_io::Error::Parse(msg) => Error::Parse(msg),
        }
    }
}

// Helper functions for creating common errors
impl Error {
    /// Create a fetch error with a custom message
    pub fn fetch(msg: impl Into<String>) -> Self {
        Error::Fetch(msg.into())
    }

    /// Create a parse error with a custom message
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a schema error for a missing column
    pub fn schema(source: impl Into<String>, column: impl Into<String>) -> Self {
        Error::Schema {
            source: source.into(),
            column: column.into(),
        }
    }

    /// Create a configuration error with a custom message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
