//! Task model - the recommender's view of an outstanding task.
//!
//! Task storage lives outside the engine; this is the subset of fields
//! the scorer reads.

use serde::{Deserialize, Serialize};
use crate::id::TaskId;
use crate::{EnergyLevel, Time};

/// A task as supplied by the external task store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    #[serde(default)]
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Category used to group reflections (e.g. "meeting")
    #[serde(default)]
    pub category: String,

    /// Priority
    #[serde(default)]
    pub priority: Priority,

    /// Energy the task demands
    #[serde(default)]
    pub energy_level: EnergyLevel,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Creation timestamp
    #[serde(default = "chrono::Utc::now")]
    pub created_at: Time,

    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Time>,
}

impl Task {
    /// Create a new incomplete task with medium priority and energy.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            category: category.into(),
            priority: Priority::default(),
            energy_level: EnergyLevel::default(),
            completed: false,
            created_at: chrono::Utc::now(),
            deadline: None,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the energy the task demands.
    pub fn with_energy(mut self, energy_level: EnergyLevel) -> Self {
        self.energy_level = energy_level;
        self
    }

    /// Set the deadline.
    pub fn with_deadline(mut self, deadline: Time) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Whole calendar days until the deadline, rounded up.
    ///
    /// Negative for overdue tasks, `None` without a deadline.
    pub fn days_until_due(&self, now: Time) -> Option<i64> {
        let deadline = self.deadline?;
        let millis = deadline.signed_duration_since(now).num_milliseconds() as f64;
        Some((millis / 86_400_000.0).ceil() as i64)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
}
