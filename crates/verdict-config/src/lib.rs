//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DataSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `VERDICT` prefix with `__` between
/// sections, e.g. `VERDICT__ENGINE__WEIGHTS__RSI=0.4`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("VERDICT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse configuration from a TOML string, without environment overrides.
pub fn parse_config(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.engine, verdict_engine::EngineConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_overrides() {
        let config = parse_config(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [engine]
            stale_after_days = 3

            [engine.weights]
            rsi = 0.4

            [engine.thresholds]
            strong_buy = 0.7
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
        assert_eq!(config.engine.stale_after_days, 3);
        assert_eq!(config.engine.weights.rsi, 0.4);
        assert_eq!(config.engine.weights.macd, 0.30);
        assert_eq!(config.engine.thresholds.strong_buy, 0.7);
        assert_eq!(config.engine.thresholds.buy, 0.2);
    }

    #[test]
    fn test_invalid_engine_section_fails_validation() {
        let config = parse_config(
            r#"
            [engine.rsi]
            overbought = 20.0
            oversold = 80.0
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_period() {
        let config = parse_config("[data]\nperiod = \"6mo\"\n").unwrap();
        assert_eq!(config.data.period, verdict_core::types::Lookback::Months(6));
        assert_eq!(config.data.dir, "data");

        assert_eq!(AppConfig::default().data.period, verdict_core::types::Lookback::Max);
        assert!(parse_config("[data]\nperiod = \"fortnight\"\n").is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = parse_config(&text).unwrap();
        assert_eq!(parsed.engine, config.engine);
        assert_eq!(parsed.data.dir, config.data.dir);
        assert_eq!(parsed.data.period, config.data.period);
    }
}
