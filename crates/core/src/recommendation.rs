//! Scored task suggestions.

use serde::{Deserialize, Serialize};
use crate::id::TaskId;

/// How well a task suits the user's current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecommendation {
    /// The task being recommended
    pub task_id: TaskId,
    /// Confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Human-readable rationale
    pub reason: String,
}

impl TaskRecommendation {
    /// Create a recommendation, clamping confidence into [0, 1].
    pub fn new(task_id: TaskId, confidence: f32, reason: impl Into<String>) -> Self {
        Self {
            task_id,
            confidence: confidence.clamp(0.0, 1.0),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(TaskRecommendation::new(TaskId::new(), 1.3, "x").confidence, 1.0);
        assert_eq!(TaskRecommendation::new(TaskId::new(), -0.4, "x").confidence, 0.0);
        assert_eq!(TaskRecommendation::new(TaskId::new(), 0.3, "x").confidence, 0.3);
    }
}
