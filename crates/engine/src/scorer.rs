//! Task scoring against the user's current energy.

use chrono::Utc;
use rde_core::{EnergyLevel, Priority, ScoringConfig, Task, TaskRecommendation, Time};
use tracing::debug;

const DEFAULT_REASON: &str = "Based on your current state and task properties";

/// Scores incomplete tasks with a fixed linear rule.
///
/// Every adjustment contributes a reason fragment, so each confidence can be
/// traced back to the properties that produced it.
#[derive(Debug, Clone, Default)]
pub struct RecommendationScorer {
    config: ScoringConfig,
}

impl RecommendationScorer {
    /// Create a scorer with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weights.
    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    /// Score every incomplete task, in input order.
    pub fn score(&self, tasks: &[Task], current: EnergyLevel) -> Vec<TaskRecommendation> {
        self.score_at(tasks, current, Utc::now())
    }

    /// Score every incomplete task as of `now`.
    pub fn score_at(&self, tasks: &[Task], current: EnergyLevel, now: Time) -> Vec<TaskRecommendation> {
        tasks
            .iter()
            .filter(|task| !task.completed)
            .map(|task| self.score_task(task, current, now))
            .collect()
    }

    /// Score a single task.
    pub fn score_task(&self, task: &Task, current: EnergyLevel, now: Time) -> TaskRecommendation {
        let mut confidence = self.config.base_confidence;
        let mut fragments: Vec<String> = Vec::new();

        if task.energy_level == current {
            confidence += self.config.energy_match_bonus;
            fragments.push(format!("matches your current energy level ({current})"));
        } else if task.energy_level.is_opposite(current) {
            confidence -= self.config.energy_mismatch_penalty;
            fragments.push("might be challenging with your current energy level".to_string());
        }

        if task.priority == Priority::High {
            confidence += self.config.high_priority_bonus;
            fragments.push("is high priority".to_string());
        }

        if let Some(days) = task.days_until_due(now) {
            if days <= self.config.due_soon_days {
                confidence += self.config.due_soon_bonus;
                fragments.push("is due soon".to_string());
            }
        }

        let reason = if fragments.is_empty() {
            DEFAULT_REASON.to_string()
        } else {
            format!("This task {}", fragments.join(" and "))
        };

        debug!("Scored task {} ('{}'): {:.2}", task.id, task.title, confidence);
        TaskRecommendation::new(task.id, confidence, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> Time {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_everything_fires_and_clamps_to_one() {
        let task = Task::new("Quarterly review", "meeting")
            .with_energy(EnergyLevel::High)
            .with_priority(Priority::High)
            .with_deadline(now() + Duration::days(1));

        let rec = RecommendationScorer::new().score_task(&task, EnergyLevel::High, now());
        assert_eq!(rec.confidence, 1.0);
        assert_eq!(
            rec.reason,
            "This task matches your current energy level (high) and is high priority and is due soon"
        );
    }

    #[test]
    fn test_opposite_energy_alone() {
        let task = Task::new("Deep work", "coding").with_energy(EnergyLevel::High);

        let rec = RecommendationScorer::new().score_task(&task, EnergyLevel::Low, now());
        assert!(approx(rec.confidence, 0.3));
        assert_eq!(rec.reason, "This task might be challenging with your current energy level");
    }

    #[test]
    fn test_medium_is_never_penalized() {
        let scorer = RecommendationScorer::new();
        let task = Task::new("Inbox", "email").with_energy(EnergyLevel::Medium);

        for current in [EnergyLevel::Low, EnergyLevel::High] {
            let rec = scorer.score_task(&task, current, now());
            assert!(approx(rec.confidence, 0.5));
            assert_eq!(rec.reason, DEFAULT_REASON);
        }
    }

    #[test]
    fn test_priority_without_energy_fragment() {
        let task = Task::new("Pay rent", "admin")
            .with_energy(EnergyLevel::Medium)
            .with_priority(Priority::High);

        let rec = RecommendationScorer::new().score_task(&task, EnergyLevel::Low, now());
        assert!(approx(rec.confidence, 0.7));
        assert_eq!(rec.reason, "This task is high priority");
    }

    #[test]
    fn test_deadline_window() {
        let scorer = RecommendationScorer::new();
        let base = Task::new("Report", "writing").with_energy(EnergyLevel::Medium);

        let soon = base.clone().with_deadline(now() + Duration::hours(20));
        assert!(approx(scorer.score_task(&soon, EnergyLevel::Low, now()).confidence, 0.8));

        let overdue = base.clone().with_deadline(now() - Duration::days(2));
        assert!(approx(scorer.score_task(&overdue, EnergyLevel::Low, now()).confidence, 0.8));

        let later = base.with_deadline(now() + Duration::hours(25));
        assert!(approx(scorer.score_task(&later, EnergyLevel::Low, now()).confidence, 0.5));
    }

    #[test]
    fn test_confidence_always_in_range() {
        let scorer = RecommendationScorer::new();
        let levels = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High];
        let priorities = [Priority::Low, Priority::Medium, Priority::High];
        let deadlines = [None, Some(now() + Duration::hours(1)), Some(now() + Duration::days(9))];

        for task_energy in levels {
            for priority in priorities {
                for deadline in deadlines {
                    let mut task = Task::new("t", "c").with_energy(task_energy).with_priority(priority);
                    task.deadline = deadline;
                    for current in levels {
                        let c = scorer.score_task(&task, current, now()).confidence;
                        assert!((0.0..=1.0).contains(&c), "confidence {c} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn test_heavy_penalty_clamps_to_zero() {
        let scorer = RecommendationScorer::new().with_config(ScoringConfig {
            energy_mismatch_penalty: 0.9,
            ..Default::default()
        });
        let task = Task::new("Run", "exercise").with_energy(EnergyLevel::High);
        assert_eq!(scorer.score_task(&task, EnergyLevel::Low, now()).confidence, 0.0);
    }

    #[test]
    fn test_score_skips_completed_and_keeps_order() {
        let mut done = Task::new("Done already", "misc");
        done.completed = true;
        let a = Task::new("A", "misc");
        let b = Task::new("B", "misc").with_priority(Priority::High);

        let recs = RecommendationScorer::new().score(&[a.clone(), done, b.clone()], EnergyLevel::Medium);
        let ids: Vec<_> = recs.iter().map(|r| r.task_id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
