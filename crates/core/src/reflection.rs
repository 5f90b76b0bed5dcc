//! Reflection model - post-task self reports and the patterns learned from them.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use crate::Time;

/// How the user felt a task went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// It went well
    Positive,
    /// It could have gone better
    Negative,
}

impl Outcome {
    /// Whether this is a positive outcome.
    pub fn is_positive(self) -> bool {
        self == Self::Positive
    }
}

/// Emotion tags the guidance templates know about.
///
/// Reflections carry free-form tags; anything outside this set is kept on
/// the record but produces no template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Anxious
    Anxious,
    /// Overwhelmed
    Overwhelmed,
    /// Distracted
    Distracted,
    /// Confident
    Confident,
}

impl Emotion {
    /// Parse a tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "anxious" => Some(Self::Anxious),
            "overwhelmed" => Some(Self::Overwhelmed),
            "distracted" => Some(Self::Distracted),
            "confident" => Some(Self::Confident),
            _ => None,
        }
    }
}

/// A user's report after completing a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReflectionRecord")]
pub struct TaskReflection {
    /// Task category (e.g. "meeting")
    pub category: String,

    /// How it went
    pub outcome: Outcome,

    /// Emotion tags, de-duplicated, in the order given
    pub emotions: Vec<String>,

    /// Coarse time-of-day label (e.g. "morning")
    pub time_of_day: String,

    /// How long the task took
    pub duration_minutes: f64,

    /// Energy at completion (0-10)
    pub energy_at_completion: u8,
}

/// Raw wire shape, normalized through [`TaskReflection::new`].
#[derive(Deserialize)]
struct ReflectionRecord {
    category: String,
    outcome: Outcome,
    #[serde(default)]
    emotions: Vec<String>,
    time_of_day: String,
    #[serde(default)]
    duration_minutes: f64,
    #[serde(default)]
    energy_at_completion: Option<u8>,
}

impl From<ReflectionRecord> for TaskReflection {
    fn from(raw: ReflectionRecord) -> Self {
        let reflection = TaskReflection::new(
            raw.category,
            raw.outcome,
            raw.emotions,
            raw.time_of_day,
            raw.duration_minutes,
        );
        match raw.energy_at_completion {
            Some(energy) => reflection.with_energy(energy),
            None => reflection,
        }
    }
}

impl TaskReflection {
    /// Create a reflection.
    ///
    /// Duplicate emotion tags are dropped, negative or non-finite durations
    /// become zero, and energy defaults to 8 for a positive outcome and 4
    /// for a negative one.
    pub fn new<I, E>(
        category: impl Into<String>,
        outcome: Outcome,
        emotions: I,
        time_of_day: impl Into<String>,
        duration_minutes: f64,
    ) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in emotions {
            let tag = tag.into();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let duration_minutes = if duration_minutes.is_finite() && duration_minutes > 0.0 {
            duration_minutes
        } else {
            0.0
        };

        Self {
            category: category.into(),
            outcome,
            emotions: tags,
            time_of_day: time_of_day.into(),
            duration_minutes,
            energy_at_completion: if outcome.is_positive() { 8 } else { 4 },
        }
    }

    /// Create a reflection for a task finished just now, bucketing the
    /// current local time.
    pub fn completed_now<I, E>(
        category: impl Into<String>,
        outcome: Outcome,
        emotions: I,
        duration_minutes: f64,
    ) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self::new(
            category,
            outcome,
            emotions,
            time_of_day_bucket(chrono::Utc::now()),
            duration_minutes,
        )
    }

    /// Set the energy at completion, capped at 10.
    pub fn with_energy(mut self, energy: u8) -> Self {
        self.energy_at_completion = energy.min(10);
        self
    }

    /// Emotion tags with a known template set, in order.
    pub fn known_emotions(&self) -> impl Iterator<Item = Emotion> + '_ {
        self.emotions.iter().filter_map(|tag| Emotion::from_tag(tag))
    }
}

/// Label the local hour of `at` as morning, afternoon, evening or night.
pub fn time_of_day_bucket(at: Time) -> String {
    let hour = at.with_timezone(&chrono::Local).hour();
    bucket_for_hour(hour).to_string()
}

fn bucket_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night",
    }
}

/// Emotion tags observed alongside each outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalTriggers {
    /// Tags reported with positive outcomes, first-seen order
    pub positive: Vec<String>,
    /// Tags reported with negative outcomes, first-seen order
    pub negative: Vec<String>,
}

impl EmotionalTriggers {
    /// Note the tags of one reflection.
    pub fn observe(&mut self, reflection: &TaskReflection) {
        let bucket = if reflection.outcome.is_positive() {
            &mut self.positive
        } else {
            &mut self.negative
        };
        for tag in &reflection.emotions {
            if !bucket.contains(tag) {
                bucket.push(tag.clone());
            }
        }
    }
}

/// Aggregate statistics for one task category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPattern {
    /// Category key
    pub category: String,

    /// Positive reflections / all reflections
    pub success_rate: f64,

    /// Most frequent time bucket among positive reflections
    pub best_time_of_day: Option<String>,

    /// Mean duration of positive reflections
    pub optimal_duration_minutes: f64,

    /// Number of reflections recorded
    pub total_count: usize,

    /// Number of positive reflections recorded
    pub positive_count: usize,

    /// Emotions seen per outcome
    pub emotional_triggers: EmotionalTriggers,
}

impl CategoryPattern {
    /// An empty pattern for a category with no history yet.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            success_rate: 0.0,
            best_time_of_day: None,
            optimal_duration_minutes: 0.0,
            total_count: 0,
            positive_count: 0,
            emotional_triggers: EmotionalTriggers::default(),
        }
    }

    /// The scheduling-relevant subset of this pattern.
    pub fn optimal_conditions(&self) -> OptimalConditions {
        OptimalConditions {
            best_time_of_day: self.best_time_of_day.clone(),
            optimal_duration_minutes: self.optimal_duration_minutes,
            success_rate: self.success_rate,
        }
    }
}

/// When and how long a category tends to go well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalConditions {
    /// Best time bucket, if any positive reflection exists
    pub best_time_of_day: Option<String>,
    /// Mean duration of positive reflections
    pub optimal_duration_minutes: f64,
    /// Success rate
    pub success_rate: f64,
}
