//! Dataset orchestration: fetch, normalize, merge, cache
//!
//! [`Dataset`] is the entry point the rest of the system uses. One call to
//! [`Dataset::load`] fetches both configured sources, normalizes them to the
//! canonical schema, left-joins the happiness scores onto the demographics
//! table, and caches the merged result in an explicit TTL slot. Repeated
//! loads within the TTL return the cached table without refetching.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::cache::TtlCache;
use crate::error::{Error, Result};
use crate::ops::join::{absent_scores, merge_happiness};
use crate::schema::{
    apply_country_aliases, normalize_demographics, normalize_happiness, DemographicsColumns,
    HappinessColumns,
};

/// Default demographics source (Gapminder country statistics)
pub const DEFAULT_DEMOGRAPHICS_URL: &str =
    "https://storage.googleapis.com/public-data-uploads/gapminder.csv";

/// Default happiness source (World Happiness Report)
pub const DEFAULT_HAPPINESS_URL: &str =
    "https://raw.githubusercontent.com/ajaytcdav/world-happiness-report/main/world-happiness-report-2024.csv";

/// Default cache window, one hour
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// The demographics source: a location plus its column spellings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsSource {
    /// HTTP(S) URL or local path of the CSV payload
    pub location: String,
    /// Column spellings of this source
    pub columns: DemographicsColumns,
}

impl Default for DemographicsSource {
    fn default() -> Self {
        Self {
            location: DEFAULT_DEMOGRAPHICS_URL.to_string(),
            columns: DemographicsColumns::default(),
        }
    }
}

/// The happiness source: a location plus its column spellings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HappinessSource {
    /// HTTP(S) URL or local path of the CSV payload
    pub location: String,
    /// Column spellings of this source
    pub columns: HappinessColumns,
}

impl Default for HappinessSource {
    fn default() -> Self {
        Self {
            location: DEFAULT_HAPPINESS_URL.to_string(),
            columns: HappinessColumns::default(),
        }
    }
}

/// What to do when the happiness source cannot be fetched or normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HappinessErrorMode {
    /// Propagate the error; the invocation produces no table
    #[default]
    Abort,
    /// Degrade to a merged table with an all-null `happiness_score` column
    Absent,
}

/// Configuration of one dataset pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Cache window in seconds
    pub ttl_secs: u64,
    /// Rewrite happiness country names through the alias table before joining
    pub country_aliases: bool,
    /// Behavior on happiness-side failure
    pub on_happiness_error: HappinessErrorMode,
    /// Demographics source
    pub demographics: DemographicsSource,
    /// Happiness source
    pub happiness: HappinessSource,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            country_aliases: true,
            on_happiness_error: HappinessErrorMode::default(),
            demographics: DemographicsSource::default(),
            happiness: HappinessSource::default(),
        }
    }
}

/// A configured dataset with its cache slot
///
/// The merged table is immutable once produced; filtering derives views from
/// a clone of the cached frame (polars columns are reference-counted, so the
/// clone is cheap). Concurrent loads may race on a refresh; the last
/// successful fetch wins and stale reads during the window are acceptable.
pub struct Dataset {
    config: DatasetConfig,
    cache: Mutex<TtlCache<DataFrame>>,
}

impl Dataset {
    /// Create a dataset from configuration with an empty cache
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(TtlCache::new()),
        }
    }

    /// The configuration this dataset was built from
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The configured cache window
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }

    /// Load the merged table, reusing the cached copy within the TTL window
    pub async fn load(&self) -> Result<DataFrame> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let demographics = wsc_io::read_source(&self.config.demographics.location)
            .await
            .map_err(Error::from);
        let happiness = wsc_io::read_source(&self.config.happiness.location)
            .await
            .map_err(Error::from);

        let merged = self.merge_raw(demographics?, happiness)?;
        self.store(merged.clone());
        Ok(merged)
    }

    /// Blocking variant of [`Dataset::load`] for callers without a runtime
    pub fn load_sync(&self) -> Result<DataFrame> {
        if let Some(cached) = self.cached() {
            return Ok(cached);
        }

        let demographics =
            wsc_io::read_source_sync(&self.config.demographics.location).map_err(Error::from);
        let happiness =
            wsc_io::read_source_sync(&self.config.happiness.location).map_err(Error::from);

        let merged = self.merge_raw(demographics?, happiness)?;
        self.store(merged.clone());
        Ok(merged)
    }

    /// Drop the cached table, forcing the next load to refetch
    pub fn invalidate(&self) {
        self.cache.lock().expect("cache lock poisoned").invalidate();
    }

    /// Normalize and merge raw source tables per the configuration
    ///
    /// Pure with respect to the cache; `load` wraps this with fetching and
    /// the TTL slot. The happiness side arrives as a `Result` so a failed
    /// fetch can still degrade to absent scores when configured to.
    pub fn merge_raw(
        &self,
        demographics_raw: DataFrame,
        happiness_raw: Result<DataFrame>,
    ) -> Result<DataFrame> {
        let demographics =
            normalize_demographics(&demographics_raw, &self.config.demographics.columns)?;

        let happiness = happiness_raw
            .and_then(|raw| normalize_happiness(&raw, &self.config.happiness.columns))
            .and_then(|normalized| {
                if self.config.country_aliases {
                    apply_country_aliases(&normalized)
                } else {
                    Ok(normalized)
                }
            });

        match happiness {
            Ok(happiness) => merge_happiness(&demographics, &happiness),
            Err(e) if self.config.on_happiness_error == HappinessErrorMode::Absent => {
                log::warn!("happiness source failed, rendering absent scores: {e}");
                absent_scores(&demographics)
            }
            Err(e) => Err(e),
        }
    }

    fn cached(&self) -> Option<DataFrame> {
        let cache = self.cache.lock().expect("cache lock poisoned");
        let hit = cache.get(Instant::now(), self.ttl()).cloned();
        if hit.is_some() {
            log::debug!("dataset cache hit");
        }
        hit
    }

    fn store(&self, table: DataFrame) {
        self.cache
            .lock()
            .expect("cache lock poisoned")
            .put(table, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use crate::schema::HAPPINESS_SCORE;

    use super::*;

    const DEMOGRAPHICS_CSV: &[u8] = b"\
country,continent,year,population,gdp_per_capita_ppp,life_expectancy,iso_alpha\n\
Norway,Europe,1999,4460000,37000,78.2,NOR\n\
Norway,Europe,2000,4490000,38000,78.6,NOR\n\
Kenya,Africa,2000,31100000,2500,53.4,KEN\n";

    const HAPPINESS_CSV: &[u8] =
        b"Country name,year,Ladder score\nNorway,2000,7.4\nKenya,2000,4.4\n";

    fn write_temp(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn config(demographics: &NamedTempFile, happiness_location: &str) -> DatasetConfig {
        DatasetConfig {
            demographics: DemographicsSource {
                location: demographics.path().to_str().unwrap().to_string(),
                columns: DemographicsColumns::default(),
            },
            happiness: HappinessSource {
                location: happiness_location.to_string(),
                columns: HappinessColumns::default(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_load_merges_sources() {
        let demo = write_temp(DEMOGRAPHICS_CSV);
        let happy = write_temp(HAPPINESS_CSV);
        let dataset = Dataset::new(config(&demo, happy.path().to_str().unwrap()));

        let table = dataset.load_sync().unwrap();
        assert_eq!(table.height(), 3);
        assert_eq!(
            table
                .column(HAPPINESS_SCORE)
                .unwrap()
                .as_materialized_series()
                .null_count(),
            1
        );
    }

    #[test]
    fn test_cache_avoids_refetch_within_window() {
        let demo = write_temp(DEMOGRAPHICS_CSV);
        let happy = write_temp(HAPPINESS_CSV);
        let dataset = Dataset::new(config(&demo, happy.path().to_str().unwrap()));

        let first = dataset.load_sync().unwrap();

        // Remove the sources; a cache hit must not notice.
        drop(demo);
        drop(happy);

        let second = dataset.load_sync().unwrap();
        assert_eq!(first.height(), second.height());

        dataset.invalidate();
        assert!(dataset.load_sync().is_err());
    }

    #[test]
    fn test_happiness_failure_aborts_by_default() {
        let demo = write_temp(DEMOGRAPHICS_CSV);
        let dataset = Dataset::new(config(&demo, "/no/such/happiness.csv"));

        let err = dataset.load_sync().unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[test]
    fn test_happiness_failure_degrades_when_configured() {
        let demo = write_temp(DEMOGRAPHICS_CSV);
        let mut config = config(&demo, "/no/such/happiness.csv");
        config.on_happiness_error = HappinessErrorMode::Absent;
        let dataset = Dataset::new(config);

        let table = dataset.load_sync().unwrap();
        assert_eq!(table.height(), 3);
        assert_eq!(
            table
                .column(HAPPINESS_SCORE)
                .unwrap()
                .as_materialized_series()
                .null_count(),
            3
        );
    }

    #[test]
    fn test_default_config_matches_original_sources() {
        let config = DatasetConfig::default();
        assert_eq!(config.demographics.location, DEFAULT_DEMOGRAPHICS_URL);
        assert_eq!(config.happiness.location, DEFAULT_HAPPINESS_URL);
        assert_eq!(config.ttl_secs, DEFAULT_TTL_SECS);
        assert!(config.country_aliases);
        assert_eq!(config.on_happiness_error, HappinessErrorMode::Abort);
    }
}
