//! The reflective decision orchestrator - turns session state into ranked suggestions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rde_core::{EngineError, MoodTrend, SuggestionConfig, TaskRecommendation, Time};
use tracing::{debug, info, warn};

use crate::{RecommendationScorer, Session, TaskSource};

/// Produces ranked task suggestions on demand.
///
/// One pass:
/// ```text
/// Fetch tasks → Score vs. energy → Read mood trend → Adjust & annotate → Rank
/// ```
/// Passes never mutate the session, so dropping one midway is harmless.
pub struct ReflectiveOrchestrator<S: TaskSource> {
    session: Arc<Session>,
    tasks: S,
    scorer: RecommendationScorer,
    config: SuggestionConfig,
    generating: AtomicBool,
}

impl<S: TaskSource> ReflectiveOrchestrator<S> {
    /// Create an orchestrator over a session and a task source, using the
    /// session's configuration.
    pub fn new(session: Arc<Session>, tasks: S) -> Self {
        let scorer = RecommendationScorer::new().with_config(session.config().scoring.clone());
        let config = session.config().suggestions.clone();
        Self {
            session,
            tasks,
            scorer,
            config,
            generating: AtomicBool::new(false),
        }
    }

    /// Whether a suggestion pass is running.
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// The session this orchestrator reads from.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The task source.
    pub fn tasks(&self) -> &S {
        &self.tasks
    }

    /// Generate ranked suggestions now.
    ///
    /// Returns [`EngineError::GenerationInProgress`] if another pass is
    /// already running; callers should treat that as a no-op.
    pub async fn generate_suggestions(&self) -> Result<Vec<TaskRecommendation>, EngineError> {
        self.generate_suggestions_at(Utc::now()).await
    }

    /// Generate ranked suggestions as of `now`.
    pub async fn generate_suggestions_at(&self, now: Time) -> Result<Vec<TaskRecommendation>, EngineError> {
        let _guard = GeneratingGuard::acquire(&self.generating)?;

        if self.config.thinking_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.thinking_delay_ms)).await;
        }

        let tasks = self.tasks.incomplete_tasks().await;
        let (energy, trend) = self.session.state().await;
        info!(
            "Generating suggestions for {} tasks (energy: {}, mood trend: {})",
            tasks.len(),
            energy,
            trend
        );

        let scored = self.scorer.score_at(&tasks, energy, now);
        let suggestions = rank(apply_trend(&self.config, trend, scored));

        if let Some(top) = suggestions.first() {
            debug!("Top suggestion: {} ({:.2})", top.task_id, top.confidence);
        }
        Ok(suggestions)
    }
}

/// Scale confidences by the mood trend and append its advice to each reason.
pub fn apply_trend(
    config: &SuggestionConfig,
    trend: MoodTrend,
    recommendations: Vec<TaskRecommendation>,
) -> Vec<TaskRecommendation> {
    recommendations
        .into_iter()
        .map(|rec| {
            let confidence = match trend {
                MoodTrend::Positive => (rec.confidence * config.positive_multiplier).min(1.0),
                MoodTrend::Negative => rec.confidence * config.negative_multiplier,
                MoodTrend::Stable => rec.confidence,
            };
            let reason = format!("{}. {}", rec.reason, trend.advice());
            TaskRecommendation::new(rec.task_id, confidence, reason)
        })
        .collect()
}

/// Sort by confidence, highest first; equal confidences keep input order.
pub fn rank(mut recommendations: Vec<TaskRecommendation>) -> Vec<TaskRecommendation> {
    recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    recommendations
}

/// Holds the busy flag for one pass and clears it on drop, including when
/// the pass is cancelled.
struct GeneratingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> GeneratingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, EngineError> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Suggestion generation already in progress; ignoring request");
            return Err(EngineError::GenerationInProgress);
        }
        Ok(Self { flag })
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
