//! Configuration management for the worldscope CLI
//!
//! Layers three sources, later wins: built-in defaults (the original remote
//! sources and their column spellings), an optional TOML config file, and
//! command-line flags.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use wsc_core::{DatasetConfig, HappinessErrorMode};

use crate::cli::Cli;

/// Main configuration structure for the worldscope runtime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset pipeline configuration
    pub dataset: DatasetConfig,
}

impl Config {
    /// Load configuration, merging an optional TOML file over the defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(location) = &cli.demographics_source {
            self.dataset.demographics.location = location.clone();
        }
        if let Some(location) = &cli.happiness_source {
            self.dataset.happiness.location = location.clone();
        }
        if let Some(ttl_secs) = cli.ttl_secs {
            self.dataset.ttl_secs = ttl_secs;
        }
        if cli.no_country_aliases {
            self.dataset.country_aliases = false;
        }
        if cli.degrade_happiness {
            self.dataset.on_happiness_error = HappinessErrorMode::Absent;
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(
            config.dataset.demographics.location,
            wsc_core::dataset::DEFAULT_DEMOGRAPHICS_URL
        );
        assert!(config.dataset.country_aliases);
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[dataset]
ttl_secs = 600
country_aliases = false

[dataset.happiness]
location = "./happiness.csv"

[dataset.happiness.columns]
country = "nation"
score = "ladder"
"#,
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.dataset.ttl_secs, 600);
        assert!(!config.dataset.country_aliases);
        assert_eq!(config.dataset.happiness.location, "./happiness.csv");
        assert_eq!(config.dataset.happiness.columns.country, "nation");
        assert_eq!(config.dataset.happiness.columns.score, "ladder");
        // Unset fields keep their defaults
        assert_eq!(config.dataset.happiness.columns.year, "year");
        assert_eq!(
            config.dataset.demographics.location,
            wsc_core::dataset::DEFAULT_DEMOGRAPHICS_URL
        );
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::try_parse_from([
            "worldscope",
            "--demographics-source",
            "./demo.csv",
            "--ttl-secs",
            "60",
            "--no-country-aliases",
            "--degrade-happiness",
            "load",
        ])
        .unwrap();

        let mut config = Config::default();
        config.apply_cli(&cli);

        assert_eq!(config.dataset.demographics.location, "./demo.csv");
        assert_eq!(config.dataset.ttl_secs, 60);
        assert!(!config.dataset.country_aliases);
        assert_eq!(config.dataset.on_happiness_error, HappinessErrorMode::Absent);
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.dataset.ttl_secs, config.dataset.ttl_secs);
    }
}
