//! Per-category aggregates built from reflections.

use std::collections::BTreeMap;

use rde_core::{CategoryPattern, OptimalConditions, TaskReflection};
use tracing::{debug, info};

/// Owns every reflection recorded in a session and the patterns derived
/// from them.
///
/// [`PatternStore::record`] is the only mutator. Aggregates are cumulative
/// and order-sensitive, so callers sharing a store must serialize writes.
#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    history: BTreeMap<String, Vec<TaskReflection>>,
    patterns: BTreeMap<String, CategoryPattern>,
}

impl PatternStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a reflection into its category's pattern.
    pub fn record(&mut self, reflection: TaskReflection) -> &CategoryPattern {
        let category = reflection.category.clone();
        let history = self.history.entry(category.clone()).or_default();
        history.push(reflection);

        let pattern = self
            .patterns
            .entry(category.clone())
            .or_insert_with(|| CategoryPattern::new(category.clone()));

        let positives: Vec<&TaskReflection> = history
            .iter()
            .filter(|r| r.outcome.is_positive())
            .collect();

        pattern.total_count = history.len();
        pattern.positive_count = positives.len();
        pattern.success_rate = positives.len() as f64 / history.len() as f64;

        if !positives.is_empty() {
            pattern.best_time_of_day = most_frequent_bucket(&positives).map(str::to_string);
            pattern.optimal_duration_minutes =
                positives.iter().map(|r| r.duration_minutes).sum::<f64>() / positives.len() as f64;
        }

        if let Some(latest) = history.last() {
            pattern.emotional_triggers.observe(latest);
        }

        info!(
            "Recorded reflection for '{}': {}/{} positive",
            category, pattern.positive_count, pattern.total_count
        );
        debug!(
            "Pattern '{}': best time {:?}, optimal duration {:.1} min",
            category, pattern.best_time_of_day, pattern.optimal_duration_minutes
        );

        pattern
    }

    /// Current pattern for a category, if it has ever been recorded.
    pub fn get(&self, category: &str) -> Option<&CategoryPattern> {
        self.patterns.get(category)
    }

    /// Best time, optimal duration and success rate for a category.
    pub fn optimal_conditions(&self, category: &str) -> Option<OptimalConditions> {
        self.get(category).map(CategoryPattern::optimal_conditions)
    }

    /// Reflections recorded for a category, in submission order.
    pub fn history(&self, category: &str) -> &[TaskReflection] {
        self.history.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Known categories, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// All patterns, sorted by category.
    pub fn patterns(&self) -> impl Iterator<Item = &CategoryPattern> {
        self.patterns.values()
    }

    /// Total reflections across all categories.
    pub fn len(&self) -> usize {
        self.history.values().map(Vec::len).sum()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Most common time bucket; ties go to the bucket seen first.
fn most_frequent_bucket<'a>(reflections: &[&'a TaskReflection]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for reflection in reflections {
        let bucket = reflection.time_of_day.as_str();
        match counts.iter_mut().find(|(b, _)| *b == bucket) {
            Some((_, count)) => *count += 1,
            None => counts.push((bucket, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (bucket, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((bucket, count));
        }
    }
    best.map(|(bucket, _)| bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rde_core::Outcome;

    fn reflection(category: &str, outcome: Outcome, bucket: &str, minutes: f64) -> TaskReflection {
        TaskReflection::new(category, outcome, ["confident"], bucket, minutes)
    }

    fn meeting_sequence() -> Vec<TaskReflection> {
        vec![
            reflection("meeting", Outcome::Positive, "morning", 20.0),
            reflection("meeting", Outcome::Positive, "morning", 30.0),
            reflection("meeting", Outcome::Negative, "afternoon", 45.0),
        ]
    }

    #[test]
    fn test_meeting_scenario() {
        let mut store = PatternStore::new();
        for r in meeting_sequence() {
            store.record(r);
        }

        let pattern = store.get("meeting").unwrap();
        assert!((pattern.success_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((pattern.success_rate - 0.667).abs() < 0.001);
        assert_eq!(pattern.best_time_of_day.as_deref(), Some("morning"));
        assert_eq!(pattern.optimal_duration_minutes, 25.0);
        assert_eq!(pattern.total_count, 3);
        assert_eq!(pattern.positive_count, 2);
    }

    #[test]
    fn test_unknown_category_is_none() {
        let store = PatternStore::new();
        assert!(store.get("meeting").is_none());
        assert!(store.optimal_conditions("meeting").is_none());
        assert!(store.history("meeting").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_success_rate_holds_for_every_prefix() {
        let outcomes = [
            Outcome::Negative,
            Outcome::Positive,
            Outcome::Negative,
            Outcome::Negative,
            Outcome::Positive,
            Outcome::Positive,
        ];
        let mut store = PatternStore::new();
        let mut positives = 0;

        for (i, outcome) in outcomes.iter().enumerate() {
            if outcome.is_positive() {
                positives += 1;
            }
            let pattern = store.record(reflection("study", *outcome, "evening", 50.0));
            let expected = positives as f64 / (i + 1) as f64;
            assert!((pattern.success_rate - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_replay_is_deterministic() {
        let mut first = PatternStore::new();
        let mut second = PatternStore::new();
        for r in meeting_sequence() {
            first.record(r.clone());
            second.record(r);
        }

        let a = first.get("meeting").unwrap();
        let b = second.get("meeting").unwrap();
        assert_eq!(a.success_rate, b.success_rate);
        assert_eq!(a.optimal_duration_minutes, b.optimal_duration_minutes);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_positive_leaves_best_time_unset() {
        let mut store = PatternStore::new();
        store.record(reflection("gym", Outcome::Negative, "night", 60.0));

        let pattern = store.get("gym").unwrap();
        assert_eq!(pattern.success_rate, 0.0);
        assert!(pattern.best_time_of_day.is_none());
        assert_eq!(pattern.optimal_duration_minutes, 0.0);
    }

    #[test]
    fn test_bucket_tie_goes_to_first_seen() {
        let mut store = PatternStore::new();
        store.record(reflection("writing", Outcome::Positive, "evening", 10.0));
        store.record(reflection("writing", Outcome::Positive, "morning", 10.0));
        assert_eq!(store.get("writing").unwrap().best_time_of_day.as_deref(), Some("evening"));

        store.record(reflection("writing", Outcome::Positive, "morning", 10.0));
        assert_eq!(store.get("writing").unwrap().best_time_of_day.as_deref(), Some("morning"));
    }

    #[test]
    fn test_categories_are_independent() {
        let mut store = PatternStore::new();
        store.record(reflection("meeting", Outcome::Positive, "morning", 20.0));
        store.record(reflection("email", Outcome::Negative, "afternoon", 5.0));

        assert_eq!(store.get("meeting").unwrap().success_rate, 1.0);
        assert_eq!(store.get("email").unwrap().success_rate, 0.0);
        assert_eq!(store.categories().collect::<Vec<_>>(), vec!["email", "meeting"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.history("meeting").len(), 1);
    }

    #[test]
    fn test_triggers_and_optimal_conditions() {
        let mut store = PatternStore::new();
        store.record(TaskReflection::new("meeting", Outcome::Negative, ["anxious"], "afternoon", 40.0));
        store.record(TaskReflection::new("meeting", Outcome::Positive, ["confident", "anxious"], "morning", 20.0));

        let pattern = store.get("meeting").unwrap();
        assert_eq!(pattern.emotional_triggers.negative, vec!["anxious"]);
        assert_eq!(pattern.emotional_triggers.positive, vec!["confident", "anxious"]);

        let conditions = store.optimal_conditions("meeting").unwrap();
        assert_eq!(conditions.best_time_of_day.as_deref(), Some("morning"));
        assert_eq!(conditions.optimal_duration_minutes, 20.0);
        assert_eq!(conditions.success_rate, 0.5);
    }
}
