//! CLI command implementations.

pub mod analyze;
pub mod indicators;
pub mod validate;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use verdict_config::{load_config, AppConfig};
use verdict_core::types::Lookback;
use verdict_data::CsvSeriesSource;

/// Load settings, falling back to defaults when the file does not exist.
pub fn load_settings(config_path: &Path) -> Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Open the CSV source named on the command line or in the configuration.
///
/// Loaded series are trimmed to `period`, or to the configured period when absent.
pub fn open_source(
    data: Option<&PathBuf>,
    period: Option<Lookback>,
    settings: &AppConfig,
) -> Result<CsvSeriesSource> {
    let path = data
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&settings.data.dir));

    if !path.exists() {
        anyhow::bail!(
            "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files (e.g. --data ./data)",
            path.display()
        );
    }

    let source = CsvSeriesSource::new(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(source.with_lookback(period.unwrap_or(settings.data.period)))
}
