//! Data operations on the canonical table
//!
//! Everything here is a pure transform: inputs are borrowed, outputs are new
//! `DataFrames`, and row order is preserved.

pub mod filter;
pub mod join;
pub mod slice;

pub use filter::{apply_filter, FilterParams, YearPredicate};
pub use join::{absent_scores, merge_happiness};
pub use slice::latest_year_slice;
