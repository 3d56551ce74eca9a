//! Analyze command implementation.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, Instrument};
use verdict_engine::{Analysis, Analyzer};
use verdict_monitor::AuditRecord;

use super::{load_settings, open_source};
use crate::cli::{AnalyzeArgs, ReportFormat};

pub async fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let settings = load_settings(config_path)?;
    let analyzer =
        Analyzer::new(settings.engine.clone()).context("Invalid engine configuration")?;
    let analyzer = Arc::new(analyzer);
    let source = Arc::new(open_source(args.data.as_ref(), args.period, &settings)?);

    let as_of = match &args.as_of {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid --as-of date '{}', expected YYYY-MM-DD", date))?,
        None => Local::now().date_naive(),
    };

    let symbols = if args.symbols.is_empty() {
        vec![default_symbol(args.data.as_deref())?]
    } else {
        args.symbols.clone()
    };

    info!("Analyzing {} symbols as of {}", symbols.len(), as_of);

    // Series are independent; one task per symbol.
    let tasks: Vec<_> = symbols
        .iter()
        .map(|symbol| {
            let symbol = symbol.clone();
            let analyzer = Arc::clone(&analyzer);
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let record = AuditRecord::start(&symbol);
                let result = analyzer
                    .analyze_from(&*source, &symbol, as_of)
                    .instrument(record.span().clone())
                    .await;
                record.finish(&result);
                (symbol, result)
            })
        })
        .collect();

    let mut analyses = Vec::with_capacity(tasks.len());
    for task in tasks {
        let (symbol, result) = task.await.context("Analysis task panicked")?;
        match result {
            Ok(mut analysis) => {
                if let Some(horizon) = args.horizon {
                    analysis
                        .verdict
                        .recommendations
                        .retain(|r| r.timeframe == horizon);
                }
                analyses.push(analysis);
            }
            Err(e) => error!(symbol, error = %e, "Failed to analyze symbol"),
        }
    }

    if analyses.is_empty() {
        anyhow::bail!("No symbols could be analyzed");
    }

    // Output results
    match args.output {
        ReportFormat::Json => println!("{}", to_json(&analyses)?),
        ReportFormat::Text => {
            for analysis in &analyses {
                println!("{}", analysis.summary());
            }
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        std::fs::write(save_path, to_json(&analyses)?)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

fn to_json(analyses: &[Analysis]) -> Result<String> {
    let json = match analyses {
        [single] => single.to_json()?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json)
}

/// Symbol implied by a single data file, e.g. `data/aapl.csv` is `AAPL`.
fn default_symbol(data: Option<&Path>) -> Result<String> {
    data.filter(|p| p.is_file())
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(|s| s.trim_end_matches("_daily").to_uppercase())
        .context("Provide symbols with -S when --data is not a single file")
}
