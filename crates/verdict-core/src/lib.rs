//! Core types and traits for the indicator and recommendation engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PricePoint, Series)
//! - Derived data types (EnrichedPoint, Signal, Recommendation)
//! - Core traits for indicators and series sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{VerdictError, VerdictResult};
pub use types::*;
pub use traits::*;
