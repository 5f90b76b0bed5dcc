//! User state - self-reported energy and mood.

use serde::{Deserialize, Serialize};
use crate::Time;

/// Coarse self-reported capacity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low capacity
    Low,
    /// Medium capacity (the default when nothing is known)
    #[default]
    Medium,
    /// High capacity
    High,
}

impl EnergyLevel {
    /// Numeric score used for averaging (low=0, medium=1, high=2).
    pub fn score(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Medium => 1.0,
            Self::High => 2.0,
        }
    }

    /// Bucket an average score back into a level.
    pub fn from_average(average: f64) -> Self {
        if average <= 0.5 {
            Self::Low
        } else if average <= 1.5 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Whether the two levels sit at opposite ends (high vs low).
    pub fn is_opposite(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::High, Self::Low) | (Self::Low, Self::High)
        )
    }
}

impl std::fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Self-reported mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Happy
    Happy,
    /// Neutral
    Neutral,
    /// Sad
    Sad,
    /// Anxious
    Anxious,
    /// Tired
    Tired,
}

impl Mood {
    /// Score used by the trend analyzer.
    pub fn score(self) -> f64 {
        match self {
            Self::Happy => 1.0,
            Self::Neutral => 0.0,
            Self::Sad => -1.0,
            Self::Anxious => -0.5,
            Self::Tired => -0.3,
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Anxious => "anxious",
            Self::Tired => "tired",
        };
        f.write_str(s)
    }
}

/// A timestamped energy reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    /// When it was logged
    #[serde(default = "chrono::Utc::now")]
    pub timestamp: Time,

    /// Reported level
    pub level: EnergyLevel,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EnergyReading {
    /// Create a reading stamped now.
    pub fn new(level: EnergyLevel, note: Option<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            level,
            note,
        }
    }
}

/// A timestamped mood reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReading {
    /// When it was logged
    #[serde(default = "chrono::Utc::now")]
    pub timestamp: Time,

    /// Reported mood
    pub mood: Mood,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MoodReading {
    /// Create a reading stamped now.
    pub fn new(mood: Mood, note: Option<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            mood,
            note,
        }
    }
}

/// Momentum classification of recent moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    /// Moods improving
    Positive,
    /// Moods declining
    Negative,
    /// No clear movement, or not enough data
    #[default]
    Stable,
}

impl MoodTrend {
    /// Sentence appended to recommendation reasons.
    pub fn advice(self) -> &'static str {
        match self {
            Self::Negative => "Consider starting with a smaller, achievable task to build momentum",
            Self::Positive => "Your positive mood is great for tackling challenging tasks",
            Self::Stable => "Maintain your steady progress",
        }
    }
}

impl std::fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Stable => write!(f, "stable"),
        }
    }
}
