//! Engine configuration.
//!
//! Every section defaults to the reference heuristics, and partial JSON
//! files fill the rest from those defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::ConfigError;

/// Top-level configuration for one engine session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Recommendation scoring weights
    pub scoring: ScoringConfig,
    /// Mood trend heuristic
    pub trend: TrendConfig,
    /// Suggestion post-processing
    pub suggestions: SuggestionConfig,
    /// State log retention
    pub retention: RetentionPolicy,
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.scoring.base_confidence) {
            return Err(ConfigError::Invalid(format!(
                "scoring.base_confidence must be within [0, 1], got {}",
                self.scoring.base_confidence
            )));
        }
        if self.trend.window < 2 {
            return Err(ConfigError::Invalid(format!(
                "trend.window must be at least 2, got {}",
                self.trend.window
            )));
        }
        if self.trend.negative_threshold > self.trend.positive_threshold {
            return Err(ConfigError::Invalid(
                "trend.negative_threshold must not exceed trend.positive_threshold".to_string(),
            ));
        }
        if self.suggestions.positive_multiplier < 0.0 || self.suggestions.negative_multiplier < 0.0 {
            return Err(ConfigError::Invalid(
                "suggestion multipliers must be non-negative".to_string(),
            ));
        }
        if self.retention.max_entries == Some(0) {
            return Err(ConfigError::Invalid(
                "retention.max_entries must be at least 1 when set".to_string(),
            ));
        }
        if matches!(self.retention.max_age_days, Some(days) if days < 1) {
            return Err(ConfigError::Invalid(
                "retention.max_age_days must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Additive weights for the recommendation scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Starting confidence for every task
    pub base_confidence: f32,
    /// Added when task energy equals current energy
    pub energy_match_bonus: f32,
    /// Subtracted when task and current energy are high/low opposites
    pub energy_mismatch_penalty: f32,
    /// Added for high-priority tasks
    pub high_priority_bonus: f32,
    /// Added when the deadline is near
    pub due_soon_bonus: f32,
    /// "Near" means at most this many days away, rounded up
    pub due_soon_days: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_confidence: 0.5,
            energy_match_bonus: 0.3,
            energy_mismatch_penalty: 0.2,
            high_priority_bonus: 0.2,
            due_soon_bonus: 0.3,
            due_soon_days: 1,
        }
    }
}

/// Mood momentum heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Number of most recent moods considered
    pub window: usize,
    /// Delta sum above this is a positive trend
    pub positive_threshold: f64,
    /// Delta sum below this is a negative trend
    pub negative_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 5,
            positive_threshold: 1.0,
            negative_threshold: -1.0,
        }
    }
}

/// How the mood trend reshapes scored recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Confidence multiplier on a positive trend (result capped at 1.0)
    pub positive_multiplier: f32,
    /// Confidence multiplier on a negative trend
    pub negative_multiplier: f32,
    /// Optional pause before suggestions are returned, in milliseconds
    pub thinking_delay_ms: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            positive_multiplier: 1.2,
            negative_multiplier: 0.8,
            thinking_delay_ms: 0,
        }
    }
}

/// Eviction policy for energy and mood logs. Unbounded by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Keep at most this many readings per log
    pub max_entries: Option<usize>,
    /// Drop readings older than this many days
    pub max_age_days: Option<i64>,
}

impl RetentionPolicy {
    /// Keep everything.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Keep at most `max_entries` readings.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Keep readings for `days` days.
    pub fn with_max_age_days(mut self, days: i64) -> Self {
        self.max_age_days = Some(days);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"trend": {"window": 7}, "suggestions": {"thinking_delay_ms": 250}}"#)
                .unwrap();
        assert_eq!(config.trend.window, 7);
        assert_eq!(config.trend.positive_threshold, 1.0);
        assert_eq!(config.suggestions.thinking_delay_ms, 250);
        assert_eq!(config.suggestions.positive_multiplier, 1.2);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_validate_rejects_short_window() {
        let mut config = EngineConfig::default();
        config.trend.window = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_retention() {
        let mut config = EngineConfig::default();
        config.retention = RetentionPolicy::unbounded().with_max_entries(0);
        assert!(config.validate().is_err());

        config.retention = RetentionPolicy::unbounded().with_max_age_days(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scoring": {{"due_soon_days": 2}}}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scoring.due_soon_days, 2);
        assert_eq!(config.scoring.base_confidence, 0.5);
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(EngineConfig::from_file(file.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let err = EngineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
