//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use verdict_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let engine = &config.engine;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Data: {}", config.data.dir);
    println!(
        "Weights: trend {:.2}, rsi {:.2}, macd {:.2}, bollinger {:.2}",
        engine.weights.trend, engine.weights.rsi, engine.weights.macd, engine.weights.bollinger
    );
    println!(
        "Thresholds: strong buy {:+.2}, buy {:+.2}, sell {:+.2}, strong sell {:+.2}",
        engine.thresholds.strong_buy,
        engine.thresholds.buy,
        engine.thresholds.sell,
        engine.thresholds.strong_sell
    );
    println!(
        "Horizons: today {:.2}, week {:.2}, month {:.2}, year {:.2}",
        engine.horizons.today, engine.horizons.week, engine.horizons.month, engine.horizons.year
    );
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
