//! Command-line interface for worldscope
//!
//! Argument parsing only; the effective configuration is assembled in
//! `config` by layering these flags over the config file and the built-in
//! defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use wsc_core::{FilterParams, YearPredicate};

/// worldscope - demographics + happiness dataset pipeline
///
/// Fetches the configured demographics and happiness-survey CSV sources,
/// merges them on (country, year), and prints the requested view on stdout
/// for an external charting component.
#[derive(Parser, Debug)]
#[command(name = "worldscope")]
#[command(author, version, about)]
#[command(after_help = "EXAMPLES:\n  \
    # Print the full merged table as CSV\n  \
    worldscope load\n\n  \
    # Rows for Europe and Asia, 1950-2023, at least half a million people\n  \
    worldscope filter --years 1950:2023 --continent Europe --continent Asia --min-population 500000\n\n  \
    # Latest-year slice for the choropleth map, as JSON\n  \
    worldscope --output-format json map\n\n  \
    # Run against local files instead of the remote sources\n  \
    worldscope --demographics-source ./gapminder.csv --happiness-source ./happiness.csv load")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for the printed table
    #[arg(long, value_enum, default_value = "csv", global = true)]
    pub output_format: OutputFormat,

    /// Override the demographics source URL or path
    #[arg(long, value_name = "LOCATION", global = true)]
    pub demographics_source: Option<String>,

    /// Override the happiness source URL or path
    #[arg(long, value_name = "LOCATION", global = true)]
    pub happiness_source: Option<String>,

    /// Override the cache window in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub ttl_secs: Option<u64>,

    /// Do not rewrite happiness country names through the alias table
    #[arg(long, global = true)]
    pub no_country_aliases: bool,

    /// Render absent scores instead of aborting when the happiness source fails
    #[arg(long, global = true)]
    pub degrade_happiness: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formats for stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of row objects
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, merge, and print the full canonical table
    Load,
    /// Fetch, merge, and print the rows matching the given predicates
    Filter(FilterArgs),
    /// Like filter, then slice to the latest year present (map input)
    Map(FilterArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Predicate flags shared by `filter` and `map`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Restrict to exactly this year
    #[arg(long, value_name = "YEAR", conflicts_with = "years")]
    pub year: Option<i64>,

    /// Restrict to an inclusive year range, MIN:MAX
    #[arg(long, value_name = "MIN:MAX", value_parser = parse_year_range)]
    pub years: Option<(i64, i64)>,

    /// Admit only these continents (repeatable)
    #[arg(long = "continent", value_name = "NAME")]
    pub continents: Vec<String>,

    /// Admit only these countries (repeatable)
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Admit only rows with at least this population
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub min_population: i64,
}

impl FilterArgs {
    /// Convert the parsed flags into pipeline filter parameters
    pub fn to_params(&self) -> FilterParams {
        let year = match (self.year, self.years) {
            (Some(y), _) => Some(YearPredicate::Exact(y)),
            (None, Some((min, max))) => Some(YearPredicate::Range { min, max }),
            (None, None) => None,
        };

        FilterParams {
            year,
            continents: self.continents.clone(),
            countries: self.countries.clone(),
            min_population: self.min_population,
        }
    }
}

/// Parse a `MIN:MAX` year range
fn parse_year_range(s: &str) -> Result<(i64, i64), String> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{s}'"))?;
    let min: i64 = min.trim().parse().map_err(|_| format!("invalid year '{min}'"))?;
    let max: i64 = max.trim().parse().map_err(|_| format!("invalid year '{max}'"))?;
    if min > max {
        return Err(format!("range is inverted: {min} > {max}"));
    }
    Ok((min, max))
}

/// Parse command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}
