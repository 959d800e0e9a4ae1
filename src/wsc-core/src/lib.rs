//! wsc-core: Core library for the worldscope dataset pipeline
//!
//! worldscope merges two remote tabular datasets - country-level
//! demographics and a happiness survey score - into one canonical table and
//! serves filtered views of it to an external charting component. This crate
//! holds everything between the raw fetched payloads and those views:
//!
//! - [`schema`] - canonical column names, per-source column maps,
//!   normalization, and the country alias table
//! - [`ops`] - the left join, predicate filtering, and the latest-year slice
//! - [`cache`] - the explicit TTL slot that avoids refetching within a window
//! - [`dataset`] - orchestration: fetch, normalize, merge, cache
//! - [`error`] - error handling and result types
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use wsc_core::{apply_filter, latest_year_slice, Dataset, DatasetConfig, FilterParams};
//!
//! let dataset = Dataset::new(DatasetConfig::default());
//! let table = dataset.load().await?;
//!
//! let filtered = apply_filter(&table, &FilterParams::default())?;
//! let map_frame = latest_year_slice(&filtered)?;
//! # Ok::<(), wsc_core::Error>(())
//! ```
//!
//! Filtering never mutates the merged table; every operation derives a new
//! `DataFrame` view.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

/// Explicit TTL caching
pub mod cache;

/// Dataset orchestration and configuration
pub mod dataset;

/// Error types and handling
pub mod error;

/// Data operations on the canonical table
pub mod ops;

/// Canonical schema and source column mapping
pub mod schema;

// Re-export commonly used types and functions
pub use crate::error::{Error, Result};

pub use crate::cache::{is_expired, CacheEntry, TtlCache};

pub use crate::dataset::{
    Dataset, DatasetConfig, DemographicsSource, HappinessErrorMode, HappinessSource,
};

pub use crate::ops::filter::{apply_filter, FilterParams, YearPredicate};
pub use crate::ops::join::{absent_scores, merge_happiness};
pub use crate::ops::slice::latest_year_slice;

pub use crate::schema::{DemographicsColumns, HappinessColumns};

/// Prelude module for convenient imports
///
/// # Examples
///
/// ```rust,ignore
/// use wsc_core::prelude::*;
///
/// let dataset = Dataset::new(DatasetConfig::default());
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::dataset::{Dataset, DatasetConfig, HappinessErrorMode};
    pub use crate::ops::filter::{apply_filter, FilterParams, YearPredicate};
    pub use crate::ops::slice::latest_year_slice;
    pub use crate::schema::{DemographicsColumns, HappinessColumns};

    // Re-export polars types that users commonly need
    pub use polars::prelude::DataFrame;
}
