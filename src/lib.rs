//! worldscope: the dataset pipeline behind a world population & happiness explorer
//!
//! This facade crate re-exports the workspace pieces: wsc-core (schema,
//! merge, filters, caching) and wsc-io (source fetching and CSV parsing).
//! The `worldscope` binary in wsc-cli drives the same API from the command
//! line.
//!
//! # Examples
//!
//! ```rust,ignore
//! use worldscope::prelude::*;
//!
//! let dataset = Dataset::new(DatasetConfig::default());
//! let table = dataset.load().await?;
//! let view = apply_filter(&table, &FilterParams::default())?;
//! # Ok::<(), worldscope::Error>(())
//! ```

pub use wsc_core::{
    absent_scores, apply_filter, is_expired, latest_year_slice, merge_happiness, Dataset,
    DatasetConfig, DemographicsColumns, DemographicsSource, Error, FilterParams,
    HappinessColumns, HappinessErrorMode, HappinessSource, Result, TtlCache, YearPredicate,
};

pub use wsc_core::{cache, dataset, error, ops, schema};

pub use wsc_io as io;

// Re-export the data engine so consumers match the pipeline's polars version
pub use polars;

/// Prelude module for convenient imports
pub mod prelude {
    pub use wsc_core::prelude::*;
}
