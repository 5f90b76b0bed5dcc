//! Per-user session state.

use rde_core::{
    CategoryPattern, EngineConfig, EnergyLevel, Mood, MoodTrend, OptimalConditions, TaskReflection, Time,
};
use rde_reflection::{GuidanceGenerator, PatternStore};
use rde_tracking::{MoodTrendAnalyzer, StateLogs};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Everything the engine knows about one user.
///
/// Sessions share nothing with each other. Within a session the pattern
/// store sits behind a mutex, so reflections are folded in one at a time
/// and in submission order.
pub struct Session {
    config: EngineConfig,
    logs: RwLock<StateLogs>,
    patterns: Mutex<PatternStore>,
    guidance: Mutex<GuidanceGenerator>,
    analyzer: MoodTrendAnalyzer,
}

impl Session {
    /// Create a session with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            logs: RwLock::new(StateLogs::new().with_retention(config.retention.clone())),
            patterns: Mutex::new(PatternStore::new()),
            guidance: Mutex::new(GuidanceGenerator::new()),
            analyzer: MoodTrendAnalyzer::new().with_config(config.trend.clone()),
            config,
        }
    }

    /// Use a specific guidance generator (e.g. a seeded one).
    pub fn with_guidance(mut self, guidance: GuidanceGenerator) -> Self {
        self.guidance = Mutex::new(guidance);
        self
    }

    /// The session's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Log the user's energy now.
    pub async fn log_energy(&self, level: EnergyLevel, note: Option<String>) {
        self.logs.write().await.append_energy(level, note);
    }

    /// Log the user's energy at a given time.
    pub async fn log_energy_at(&self, level: EnergyLevel, note: Option<String>, at: Time) {
        self.logs.write().await.append_energy_at(level, note, at);
    }

    /// Log the user's mood now.
    pub async fn log_mood(&self, mood: Mood, note: Option<String>) {
        self.logs.write().await.append_mood(mood, note);
    }

    /// Log the user's mood at a given time.
    pub async fn log_mood_at(&self, mood: Mood, note: Option<String>, at: Time) {
        self.logs.write().await.append_mood_at(mood, note, at);
    }

    /// Most recently logged energy.
    pub async fn current_energy(&self) -> EnergyLevel {
        self.logs.read().await.current_energy()
    }

    /// Average of today's energy readings.
    pub async fn daily_average_energy(&self) -> EnergyLevel {
        self.logs.read().await.daily_average_energy()
    }

    /// Momentum of recent moods.
    pub async fn mood_trend(&self) -> MoodTrend {
        let logs = self.logs.read().await;
        self.analyzer.trend(&logs)
    }

    /// Current energy and mood trend from one consistent view of the logs.
    pub async fn state(&self) -> (EnergyLevel, MoodTrend) {
        let logs = self.logs.read().await;
        (logs.current_energy(), self.analyzer.trend(&logs))
    }

    /// Record a reflection and return guidance for it.
    pub async fn reflect(&self, reflection: TaskReflection) -> Vec<String> {
        let pattern = {
            let mut store = self.patterns.lock().await;
            store.record(reflection.clone()).clone()
        };

        let guidance = self.guidance.lock().await.generate(&reflection, Some(&pattern));
        info!(
            "Reflection on '{}' produced {} guidance lines",
            reflection.category,
            guidance.len()
        );
        guidance
    }

    /// Snapshot of a category's pattern.
    pub async fn pattern(&self, category: &str) -> Option<CategoryPattern> {
        self.patterns.lock().await.get(category).cloned()
    }

    /// Snapshot of every pattern, sorted by category.
    pub async fn patterns(&self) -> Vec<CategoryPattern> {
        self.patterns.lock().await.patterns().cloned().collect()
    }

    /// Best time, optimal duration and success rate for a category.
    pub async fn optimal_conditions(&self, category: &str) -> Option<OptimalConditions> {
        self.patterns.lock().await.optimal_conditions(category)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
