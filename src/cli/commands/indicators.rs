//! Indicators command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use verdict_core::traits::SeriesSource;
use verdict_core::types::EnrichedPoint;
use verdict_engine::Analyzer;

use super::{load_settings, open_source};
use crate::cli::{IndicatorsArgs, SeriesFormat};

/// One CSV row; the csv writer cannot flatten nested structs.
#[derive(Serialize)]
struct IndicatorRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    #[serde(rename = "SMA_20")]
    sma_20: Option<f64>,
    #[serde(rename = "SMA_50")]
    sma_50: Option<f64>,
    #[serde(rename = "EMA_12")]
    ema_12: Option<f64>,
    #[serde(rename = "EMA_26")]
    ema_26: Option<f64>,
    #[serde(rename = "BB_Upper")]
    bb_upper: Option<f64>,
    #[serde(rename = "BB_Middle")]
    bb_middle: Option<f64>,
    #[serde(rename = "BB_Lower")]
    bb_lower: Option<f64>,
    #[serde(rename = "BB_Width")]
    bb_width: Option<f64>,
    #[serde(rename = "MACD")]
    macd: Option<f64>,
    #[serde(rename = "MACD_Signal")]
    macd_signal: Option<f64>,
    #[serde(rename = "MACD_Histogram")]
    macd_histogram: Option<f64>,
    #[serde(rename = "RSI")]
    rsi: Option<f64>,
}

impl From<&EnrichedPoint> for IndicatorRow {
    fn from(p: &EnrichedPoint) -> Self {
        Self {
            date: p.point.date,
            open: p.point.open,
            high: p.point.high,
            low: p.point.low,
            close: p.point.close,
            volume: p.point.volume,
            sma_20: p.sma_20,
            sma_50: p.sma_50,
            ema_12: p.ema_12,
            ema_26: p.ema_26,
            bb_upper: p.bb_upper,
            bb_middle: p.bb_middle,
            bb_lower: p.bb_lower,
            bb_width: p.bb_width,
            macd: p.macd,
            macd_signal: p.macd_signal,
            macd_histogram: p.macd_histogram,
            rsi: p.rsi,
        }
    }
}

pub async fn run(args: IndicatorsArgs, config_path: &Path) -> Result<()> {
    let settings = load_settings(config_path)?;
    let analyzer = Analyzer::new(settings.engine.clone()).context("Invalid engine configuration")?;
    let source = open_source(args.data.as_ref(), args.period, &settings)?;

    let series = source
        .load_series(&args.symbol)
        .await
        .with_context(|| format!("Failed to load {}", args.symbol))?;
    let enriched = analyzer.enrich(&series);

    let rendered = match args.output {
        SeriesFormat::Json => serde_json::to_string_pretty(&enriched)?,
        SeriesFormat::Csv => to_csv(&enriched)?,
    };

    match &args.save {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("{} rows saved to {:?}", enriched.len(), path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn to_csv(points: &[EnrichedPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in points {
        writer.serialize(IndicatorRow::from(point))?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    Ok(String::from_utf8(bytes)?)
}
