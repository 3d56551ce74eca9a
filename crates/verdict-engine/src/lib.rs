//! Signal classification and recommendation engine.
//!
//! Turns an enriched price series into:
//! - One classified signal per indicator family (trend, RSI, MACD, Bollinger)
//! - A weighted composite score with per-family breakdown
//! - A recommendation for each horizon (today, week, month, year)
//!
//! [`Analyzer`] runs the whole pipeline for one series.

mod analysis;
mod classifier;
mod config;
mod recommendation;
mod report;

pub use analysis::{analyze, Analysis, Analyzer};
pub use classifier::{classified_index, classify, flat_tolerance};
pub use config::{ActionThresholds, EngineConfig, FamilyWeights, HorizonMultipliers, RsiBands};
pub use recommendation::{
    action_for, composite_score, confidence_for, effective_weights, label_score, recommend,
    FamilyScore, Verdict,
};
