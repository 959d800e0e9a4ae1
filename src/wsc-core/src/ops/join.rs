//! Merge of the happiness table into the demographics table
//!
//! A left outer join on `(country, year)`: every demographics row survives,
//! unmatched rows get a null `happiness_score`, and the happiness side must
//! be unique per key so the join never fans out. Cardinality is checked
//! before the join so the error can name the offending key.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::{Error, Result};
use crate::schema::{COUNTRY, HAPPINESS_SCORE, YEAR};

/// Left-join a normalized happiness table onto a normalized demographics table
///
/// Both inputs carry canonical column names (see [`crate::schema`]). The
/// result has exactly the demographics row count and row order, with a
/// `happiness_score` column that is null wherever the happiness side had no
/// matching `(country, year)` key.
pub fn merge_happiness(demographics: &DataFrame, happiness: &DataFrame) -> Result<DataFrame> {
    check_happiness_cardinality(happiness)?;

    let args = JoinArgs {
        how: JoinType::Left,
        suffix: None,
        validation: JoinValidation::ManyToOne,
        slice: None,
        coalesce: JoinCoalesce::CoalesceColumns,
        maintain_order: MaintainOrderJoin::Left,
        nulls_equal: false,
    };

    let merged = demographics
        .clone()
        .lazy()
        .join(
            happiness.clone().lazy(),
            [col(COUNTRY), col(YEAR)],
            [col(COUNTRY), col(YEAR)],
            args,
        )
        .collect()?;

    // A null-keyed or otherwise degenerate right side must still never
    // change the left-side row count.
    if merged.height() != demographics.height() {
        return Err(Error::JoinCardinality {
            country: "<unknown>".to_string(),
            year: 0,
        });
    }

    log::debug!(
        "merged happiness into demographics: {} rows, {} with scores",
        merged.height(),
        merged.height()
            - merged
                .column(HAPPINESS_SCORE)?
                .as_materialized_series()
                .null_count()
    );

    Ok(merged)
}

/// Degraded merge: demographics with an all-null `happiness_score` column
///
/// Used when the happiness source failed and the configuration opts into
/// rendering without scores instead of aborting.
pub fn absent_scores(demographics: &DataFrame) -> Result<DataFrame> {
    let mut out = demographics.clone();
    out.with_column(Series::full_null(
        HAPPINESS_SCORE.into(),
        demographics.height(),
        &DataType::Float64,
    ))?;
    Ok(out)
}

/// Fail if any `(country, year)` key occurs more than once on the happiness side
fn check_happiness_cardinality(happiness: &DataFrame) -> Result<()> {
    let countries = happiness.column(COUNTRY)?.as_materialized_series().str()?;
    let years = happiness.column(YEAR)?.as_materialized_series().i64()?;

    let mut seen: HashSet<(String, i64)> = HashSet::with_capacity(happiness.height());
    for (country, year) in countries.iter().zip(years.iter()) {
        let (Some(country), Some(year)) = (country, year) else {
            continue;
        };
        if !seen.insert((country.to_string(), year)) {
            return Err(Error::JoinCardinality {
                country: country.to_string(),
                year,
            });
        }
    }
    Ok(())
}
