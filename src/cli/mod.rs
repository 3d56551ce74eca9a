//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use verdict_core::types::{Horizon, Lookback};

#[derive(Parser)]
#[command(name = "verdict")]
#[command(author, version, about = "Technical indicators and buy/sell recommendations for daily price series")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one or more symbols and print recommendations
    Analyze(AnalyzeArgs),
    /// Dump the enriched series for charting
    Indicators(IndicatorsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesFormat {
    Csv,
    Json,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbols to analyze (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Data file or directory of CSV files (defaults to the configured data dir)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Trailing history to use: 5d, 1mo, 6mo, 1y, 10y, ytd, max (overrides config)
    #[arg(long)]
    pub period: Option<Lookback>,

    /// Evaluation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub as_of: Option<String>,

    /// Only report this horizon (today, week, month, year)
    #[arg(long)]
    pub horizon: Option<Horizon>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: ReportFormat,

    /// Save JSON results to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Symbol to enrich
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// Data file or directory of CSV files (defaults to the configured data dir)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Trailing history to use: 5d, 1mo, 6mo, 1y, 10y, ytd, max (overrides config)
    #[arg(long)]
    pub period: Option<Lookback>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub output: SeriesFormat,

    /// Write to file instead of stdout
    #[arg(long)]
    pub save: Option<PathBuf>,
}
