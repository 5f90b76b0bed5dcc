//! State tracking
//!
//! Append-only energy and mood logs, and the mood momentum heuristic.

#![warn(missing_docs, unused_crate_dependencies)]

pub mod logs;
pub mod trend;

pub use logs::StateLogs;
pub use trend::MoodTrendAnalyzer;
