//! Latest-year slice for the choropleth map
//!
//! The map renders a single frame: the rows whose `year` equals the maximum
//! year present in the (already filtered) table.

use polars::prelude::*;

use crate::error::{Error, Result};
use crate::schema::YEAR;

/// Return the rows whose `year` equals the maximum year in `df`
///
/// Fails with [`Error::EmptyTable`] when `df` has no rows, since no maximum
/// is defined.
pub fn latest_year_slice(df: &DataFrame) -> Result<DataFrame> {
    let max_year = df
        .column(YEAR)?
        .as_materialized_series()
        .i64()?
        .max()
        .ok_or(Error::EmptyTable)?;

    let sliced = df.clone().lazy().filter(col(YEAR).eq(lit(max_year))).collect()?;
    Ok(sliced)
}
