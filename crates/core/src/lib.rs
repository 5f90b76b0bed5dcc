//! Core data models for the reflective decision engine.
//!
//! This crate defines the records shared by every layer: energy and mood
//! readings, tasks as seen by the recommender, post-task reflections, the
//! per-category patterns derived from them, and the engine configuration.

#![warn(missing_docs)]

// Identities
mod id;

// User state
mod state;

// Tasks and recommendations
mod task;
mod recommendation;

// Reflections and learned patterns
mod reflection;

// Ambient
mod config;
mod error;

// Re-exports
pub use id::TaskId;

pub use state::{EnergyLevel, EnergyReading, Mood, MoodReading, MoodTrend};
pub use task::{Task, Priority};
pub use recommendation::TaskRecommendation;
pub use reflection::{
    TaskReflection, Outcome, Emotion, CategoryPattern, EmotionalTriggers, OptimalConditions,
    time_of_day_bucket,
};

pub use config::{EngineConfig, ScoringConfig, TrendConfig, SuggestionConfig, RetentionPolicy};
pub use error::{EngineError, ConfigError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
