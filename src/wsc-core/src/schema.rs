//! Canonical schema and source column mapping
//!
//! Each upstream variant serves the same logical table under different column
//! spellings (`pop` vs `population`, `gdp_per_capita_ppp` vs
//! `gdpPercap`, `Country name` vs `country`). A [`DemographicsColumns`] /
//! [`HappinessColumns`] map records the spelling of one configured source;
//! normalization renames and projects to the canonical names, casting to the
//! canonical dtypes, and fails with a schema error naming the first missing
//! column.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical column: country name, join key component
pub const COUNTRY: &str = "country";
/// Canonical column: continent
pub const CONTINENT: &str = "continent";
/// Canonical column: observation year, join key component
pub const YEAR: &str = "year";
/// Canonical column: population
pub const POPULATION: &str = "population";
/// Canonical column: GDP per capita
pub const GDP_PER_CAPITA: &str = "gdp_per_capita";
/// Canonical column: life expectancy at birth
pub const LIFE_EXPECTANCY: &str = "life_expectancy";
/// Canonical column: ISO 3166-1 alpha-3 code
pub const ISO_ALPHA: &str = "iso_alpha";
/// Canonical column: happiness survey ladder score, null when unmatched
pub const HAPPINESS_SCORE: &str = "happiness_score";

/// Column spellings of a demographics source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsColumns {
    /// Source column holding the country name
    pub country: String,
    /// Source column holding the continent
    pub continent: String,
    /// Source column holding the year
    pub year: String,
    /// Source column holding the population count
    pub population: String,
    /// Source column holding GDP per capita
    pub gdp_per_capita: String,
    /// Source column holding life expectancy
    pub life_expectancy: String,
    /// Source column holding the ISO alpha-3 code
    pub iso_alpha: String,
}

impl Default for DemographicsColumns {
    fn default() -> Self {
        Self {
            country: COUNTRY.to_string(),
            continent: CONTINENT.to_string(),
            year: YEAR.to_string(),
            population: POPULATION.to_string(),
            gdp_per_capita: "gdp_per_capita_ppp".to_string(),
            life_expectancy: LIFE_EXPECTANCY.to_string(),
            iso_alpha: ISO_ALPHA.to_string(),
        }
    }
}

/// Column spellings of a happiness source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HappinessColumns {
    /// Source column holding the country name
    pub country: String,
    /// Source column holding the year
    pub year: String,
    /// Source column holding the ladder score
    pub score: String,
}

impl Default for HappinessColumns {
    fn default() -> Self {
        Self {
            country: "Country name".to_string(),
            year: YEAR.to_string(),
            score: "Ladder score".to_string(),
        }
    }
}

/// Happiness-report country spellings that differ from the demographics
/// table. Names not covered here silently join to an absent score.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("United States of America", "United States"),
    ("United Kingdom of Great Britain and Northern Ireland", "United Kingdom"),
    ("Russian Federation", "Russia"),
    ("Republic of Korea", "South Korea"),
    ("Viet Nam", "Vietnam"),
    ("Czechia", "Czech Republic"),
    ("Turkiye", "Turkey"),
    ("Bolivia (Plurinational State of)", "Bolivia"),
    ("Iran (Islamic Republic of)", "Iran"),
    ("Tanzania, United Republic of", "Tanzania"),
];

/// Look up the demographics-side spelling for a happiness-side country name
pub fn country_alias(name: &str) -> Option<&'static str> {
    COUNTRY_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

/// Verify that every mapped source column is present
///
/// `source` names the configured source ("demographics" or "happiness") so
/// the error identifies which fetch produced the bad table.
pub fn ensure_columns(df: &DataFrame, source: &str, columns: &[&str]) -> Result<()> {
    let present = df.get_column_names_str();
    for column in columns {
        if !present.contains(column) {
            return Err(Error::schema(source, *column));
        }
    }
    Ok(())
}

/// Rename and project a demographics source table to the canonical schema
pub fn normalize_demographics(df: &DataFrame, map: &DemographicsColumns) -> Result<DataFrame> {
    ensure_columns(
        df,
        "demographics",
        &[
            map.country.as_str(),
            map.continent.as_str(),
            map.year.as_str(),
            map.population.as_str(),
            map.gdp_per_capita.as_str(),
            map.life_expectancy.as_str(),
            map.iso_alpha.as_str(),
        ],
    )?;

    let normalized = df
        .clone()
        .lazy()
        .select([
            col(map.country.as_str()).cast(DataType::String).alias(COUNTRY),
            col(map.continent.as_str()).cast(DataType::String).alias(CONTINENT),
            col(map.year.as_str()).cast(DataType::Int64).alias(YEAR),
            col(map.population.as_str()).cast(DataType::Int64).alias(POPULATION),
            col(map.gdp_per_capita.as_str())
                .cast(DataType::Float64)
                .alias(GDP_PER_CAPITA),
            col(map.life_expectancy.as_str())
                .cast(DataType::Float64)
                .alias(LIFE_EXPECTANCY),
            col(map.iso_alpha.as_str()).cast(DataType::String).alias(ISO_ALPHA),
        ])
        .collect()?;

    Ok(normalized)
}

/// Rename and project a happiness source table to `{country, year, happiness_score}`
///
/// Idempotent: normalizing an already-canonical table with a canonical map
/// yields the same schema.
pub fn normalize_happiness(df: &DataFrame, map: &HappinessColumns) -> Result<DataFrame> {
    ensure_columns(
        df,
        "happiness",
        &[map.country.as_str(), map.year.as_str(), map.score.as_str()],
    )?;

    let normalized = df
        .clone()
        .lazy()
        .select([
            col(map.country.as_str()).cast(DataType::String).alias(COUNTRY),
            col(map.year.as_str()).cast(DataType::Int64).alias(YEAR),
            col(map.score.as_str())
                .cast(DataType::Float64)
                .alias(HAPPINESS_SCORE),
        ])
        .collect()?;

    Ok(normalized)
}

/// Rewrite happiness-side country names through the alias table
///
/// Applied to the normalized happiness table before the join so keys line up
/// with the demographics spelling.
pub fn apply_country_aliases(df: &DataFrame) -> Result<DataFrame> {
    let countries = df.column(COUNTRY)?.as_materialized_series().str()?;

    let rewritten: StringChunked = countries
        .iter()
        .map(|opt| opt.map(|name| country_alias(name).unwrap_or(name)))
        .collect();

    let mut out = df.clone();
    out.with_column(rewritten.with_name(COUNTRY.into()).into_series())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use polars::prelude::*;

    use super::*;

    fn raw_happiness() -> DataFrame {
        df! {
            "Country name" => ["Finland", "United States of America"],
            "year" => [2023, 2023],
            "Ladder score" => [7.8, 6.9],
            "Rank" => [1, 23]
        }
        .unwrap()
    }

    #[test]
    fn test_normalize_happiness_projects_and_renames() {
        let df = normalize_happiness(&raw_happiness(), &HappinessColumns::default()).unwrap();

        assert_eq!(df.get_column_names_str(), vec![COUNTRY, YEAR, HAPPINESS_SCORE]);
        assert_eq!(df.height(), 2);
        assert_eq!(df.column(YEAR).unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column(HAPPINESS_SCORE).unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_normalize_happiness_is_idempotent() {
        let once = normalize_happiness(&raw_happiness(), &HappinessColumns::default()).unwrap();

        let canonical_map = HappinessColumns {
            country: COUNTRY.to_string(),
            year: YEAR.to_string(),
            score: HAPPINESS_SCORE.to_string(),
        };
        let twice = normalize_happiness(&once, &canonical_map).unwrap();

        assert_eq!(once.get_column_names_str(), twice.get_column_names_str());
        assert_eq!(once.height(), twice.height());
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let df = df! {
            "Country name" => ["Finland"],
            "year" => [2023]
        }
        .unwrap();

        let err = normalize_happiness(&df, &HappinessColumns::default()).unwrap_err();
        match err {
            crate::Error::Schema { source, column } => {
                assert_eq!(source, "happiness");
                assert_eq!(column, "Ladder score");
            }
            other => panic!("expected Schema error, got {other}"),
        }
    }

    #[test]
    fn test_normalize_demographics_default_map() {
        let df = df! {
            "country" => ["Sweden"],
            "continent" => ["Europe"],
            "year" => [2000],
            "population" => [8872000i64],
            "gdp_per_capita_ppp" => [27000.0],
            "life_expectancy" => [79.6],
            "iso_alpha" => ["SWE"]
        }
        .unwrap();

        let out = normalize_demographics(&df, &DemographicsColumns::default()).unwrap();
        assert_eq!(
            out.get_column_names_str(),
            vec![
                COUNTRY,
                CONTINENT,
                YEAR,
                POPULATION,
                GDP_PER_CAPITA,
                LIFE_EXPECTANCY,
                ISO_ALPHA
            ]
        );
    }

    #[test]
    fn test_country_alias_lookup() {
        assert_eq!(country_alias("United States of America"), Some("United States"));
        assert_eq!(country_alias("Finland"), None);
    }

    #[test]
    fn test_apply_country_aliases() {
        let df = normalize_happiness(&raw_happiness(), &HappinessColumns::default()).unwrap();
        let out = apply_country_aliases(&df).unwrap();

        let countries = out.column(COUNTRY).unwrap().as_materialized_series().str().unwrap();
        assert_eq!(countries.get(0), Some("Finland"));
        assert_eq!(countries.get(1), Some("United States"));
    }
}
