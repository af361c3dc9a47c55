//! Detection configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;

/// Tuning knobs for a detection run.
///
/// All thresholds are passed explicitly into the engine at construction
/// time; there is no module-level mutable state, so differently
/// configured runs cannot interfere with each other. Unrecognized keys
/// in configuration sources are ignored; missing keys take defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Standard deviations above the mean before an amount is unusual.
    #[serde(default = "default_threshold_multiplier")]
    pub amount_threshold_multiplier: Decimal,
    /// Lookback window (days) for duplicate matching.
    #[serde(default = "default_duplicate_window_days")]
    pub duplicate_window_days: i64,
    /// Entries older than this many years are flagged as stale.
    #[serde(default = "default_date_staleness_years")]
    pub date_staleness_years: i32,
    /// Maximum number of lines before an entry is unusually complex.
    #[serde(default = "default_max_line_count")]
    pub max_line_count: usize,
    /// Minimum sample count before a per-account baseline is trusted.
    #[serde(default = "default_min_baseline_sample")]
    pub min_baseline_sample: usize,
}

fn default_threshold_multiplier() -> Decimal {
    Decimal::new(30, 1) // 3.0
}

fn default_duplicate_window_days() -> i64 {
    30
}

fn default_date_staleness_years() -> i32 {
    2
}

fn default_max_line_count() -> usize {
    10
}

fn default_min_baseline_sample() -> usize {
    5
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            amount_threshold_multiplier: default_threshold_multiplier(),
            duplicate_window_days: default_duplicate_window_days(),
            date_staleness_years: default_date_staleness_years(),
            max_line_count: default_max_line_count(),
            min_baseline_sample: default_min_baseline_sample(),
        }
    }
}

impl DetectionConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Reads `config/default` and `config/{RUN_MODE}` if present, then
    /// applies `LEDGERLINT__`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`](crate::error::AppError) if a
    /// configuration source cannot be parsed.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLINT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
