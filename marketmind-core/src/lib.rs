//! MarketMind Core — price series normalization and moving-average enrichment.
//!
//! This crate contains:
//! - Domain types (bars, price points, indicator points, windows)
//! - Lookup backend client and saved-response replay
//! - Time series normalizer
//! - SMA and EMA annotators
//! - Enrichment pipeline and last-point summary
//! - Configuration and output formats

pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod indicators;
pub mod pipeline;
pub mod summary;

pub use config::{ConfigError, MarketMindConfig};
pub use pipeline::{analyze, enrich, fetch_and_analyze, Analysis, AnalysisError};
pub use summary::IndicatorSummary;
