//! Predicate filtering of the merged table
//!
//! The UI widgets (year slider, continent/country multiselects, population
//! slider) reduce to a plain [`FilterParams`] value so the pipeline stays
//! decoupled from any particular frontend. Filtering is pure: it derives a
//! view, preserves row order, and applies only the predicates that are set.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{CONTINENT, COUNTRY, POPULATION, YEAR};

/// Year restriction: a single year or an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearPredicate {
    /// Exactly this year
    Exact(i64),
    /// Inclusive `[min, max]` range
    Range {
        /// Lower bound, inclusive
        min: i64,
        /// Upper bound, inclusive
        max: i64,
    },
}

impl YearPredicate {
    /// Whether a year satisfies the predicate
    pub fn matches(&self, year: i64) -> bool {
        match self {
            YearPredicate::Exact(y) => year == *y,
            YearPredicate::Range { min, max } => year >= *min && year <= *max,
        }
    }
}

/// The full set of user-selected predicates
///
/// Unset dimensions restrict nothing: `year: None` admits every year, empty
/// `continents`/`countries` admit every member, and `min_population: 0`
/// admits every row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Year restriction, if any
    pub year: Option<YearPredicate>,
    /// Admitted continents; empty means all
    pub continents: Vec<String>,
    /// Admitted countries; empty means all
    pub countries: Vec<String>,
    /// Minimum population, inclusive
    pub min_population: i64,
}

/// Return the subset of rows satisfying all active predicates
///
/// Row order is preserved and the input is never mutated.
pub fn apply_filter(df: &DataFrame, params: &FilterParams) -> Result<DataFrame> {
    let mut predicate = col(POPULATION).gt_eq(lit(params.min_population));

    if let Some(year) = &params.year {
        predicate = predicate.and(match year {
            YearPredicate::Exact(y) => col(YEAR).eq(lit(*y)),
            YearPredicate::Range { min, max } => {
                col(YEAR).gt_eq(lit(*min)).and(col(YEAR).lt_eq(lit(*max)))
            }
        });
    }

    if !params.continents.is_empty() {
        predicate = predicate.and(membership(CONTINENT, &params.continents));
    }

    if !params.countries.is_empty() {
        predicate = predicate.and(membership(COUNTRY, &params.countries));
    }

    let filtered = df.clone().lazy().filter(predicate).collect()?;
    Ok(filtered)
}

/// Membership predicate over a string column
fn membership(column: &str, admitted: &[String]) -> Expr {
    admitted
        .iter()
        .fold(lit(false), |acc, value| acc.or(col(column).eq(lit(value.as_str()))))
}
