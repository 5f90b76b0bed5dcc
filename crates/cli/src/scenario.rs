//! Scenario files - a session's inputs captured as JSON.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rde_core::{EngineConfig, EnergyReading, MoodReading, Task, TaskReflection};
use rde_engine::Session;
use rde_reflection::GuidanceGenerator;
use serde::Deserialize;

/// Tasks, readings and reflections to replay into a fresh session.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub tasks: Vec<Task>,
    pub energy: Vec<EnergyReading>,
    pub moods: Vec<MoodReading>,
    pub reflections: Vec<TaskReflection>,
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    /// Build a session holding this scenario's energy and mood history.
    pub async fn session(&self, config: EngineConfig, seed: Option<u64>) -> Arc<Session> {
        let mut session = Session::new(config);
        if let Some(seed) = seed {
            session = session.with_guidance(GuidanceGenerator::seeded(seed));
        }

        for reading in &self.energy {
            session
                .log_energy_at(reading.level, reading.note.clone(), reading.timestamp)
                .await;
        }
        for reading in &self.moods {
            session
                .log_mood_at(reading.mood, reading.note.clone(), reading.timestamp)
                .await;
        }

        Arc::new(session)
    }
}
