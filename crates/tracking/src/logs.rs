//! Append-only energy and mood logs.

use std::collections::VecDeque;

use chrono::{Duration, Local, Utc};
use rde_core::{EnergyLevel, EnergyReading, Mood, MoodReading, RetentionPolicy, Time};
use tracing::{debug, warn};

/// Timestamped history of the user's energy and mood for one session.
///
/// Readings are stored in call order and timestamps never go backwards.
/// The optional [`RetentionPolicy`] evicts the oldest readings on append.
#[derive(Debug, Clone, Default)]
pub struct StateLogs {
    energy: VecDeque<EnergyReading>,
    moods: VecDeque<MoodReading>,
    retention: RetentionPolicy,
}

impl StateLogs {
    /// Create empty, unbounded logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retention policy.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Log an energy level now.
    pub fn append_energy(&mut self, level: EnergyLevel, note: Option<String>) {
        self.append_energy_at(level, note, Utc::now());
    }

    /// Log an energy level at a given time.
    pub fn append_energy_at(&mut self, level: EnergyLevel, note: Option<String>, at: Time) {
        let timestamp = monotonic(self.energy.back().map(|r| r.timestamp), at);
        debug!("Energy logged: {} at {}", level, timestamp);
        self.energy.push_back(EnergyReading { timestamp, level, note });
        evict(&mut self.energy, &self.retention, timestamp);
    }

    /// Log a mood now.
    pub fn append_mood(&mut self, mood: Mood, note: Option<String>) {
        self.append_mood_at(mood, note, Utc::now());
    }

    /// Log a mood at a given time.
    pub fn append_mood_at(&mut self, mood: Mood, note: Option<String>, at: Time) {
        let timestamp = monotonic(self.moods.back().map(|r| r.timestamp), at);
        debug!("Mood logged: {} at {}", mood, timestamp);
        self.moods.push_back(MoodReading { timestamp, mood, note });
        evict(&mut self.moods, &self.retention, timestamp);
    }

    /// Most recently logged energy level, `medium` if none.
    pub fn current_energy(&self) -> EnergyLevel {
        self.energy.back().map(|r| r.level).unwrap_or_default()
    }

    /// Average of today's energy readings.
    pub fn daily_average_energy(&self) -> EnergyLevel {
        self.daily_average_energy_at(Utc::now())
    }

    /// Average of the energy readings on the local calendar day of `now`,
    /// `medium` if there are none.
    pub fn daily_average_energy_at(&self, now: Time) -> EnergyLevel {
        let today = now.with_timezone(&Local).date_naive();

        let (sum, count) = self
            .energy
            .iter()
            .filter(|r| r.timestamp.with_timezone(&Local).date_naive() == today)
            .fold((0.0, 0usize), |(sum, count), r| (sum + r.level.score(), count + 1));

        if count == 0 {
            return EnergyLevel::Medium;
        }

        EnergyLevel::from_average(sum / count as f64)
    }

    /// The last `n` moods, oldest first.
    pub fn recent_moods(&self, n: usize) -> Vec<Mood> {
        let skip = self.moods.len().saturating_sub(n);
        self.moods.iter().skip(skip).map(|r| r.mood).collect()
    }

    /// All retained energy readings, oldest first.
    pub fn energy_readings(&self) -> impl Iterator<Item = &EnergyReading> {
        self.energy.iter()
    }

    /// All retained mood readings, oldest first.
    pub fn mood_readings(&self) -> impl Iterator<Item = &MoodReading> {
        self.moods.iter()
    }

    /// Number of retained energy readings.
    pub fn energy_len(&self) -> usize {
        self.energy.len()
    }

    /// Number of retained mood readings.
    pub fn mood_len(&self) -> usize {
        self.moods.len()
    }
}

fn monotonic(last: Option<Time>, at: Time) -> Time {
    match last {
        Some(last) if at < last => {
            warn!("Reading timestamp {} precedes last entry {}, using {}", at, last, last);
            last
        }
        _ => at,
    }
}

trait Stamped {
    fn timestamp(&self) -> Time;
}

impl Stamped for EnergyReading {
    fn timestamp(&self) -> Time {
        self.timestamp
    }
}

impl Stamped for MoodReading {
    fn timestamp(&self) -> Time {
        self.timestamp
    }
}

fn evict<R: Stamped>(log: &mut VecDeque<R>, retention: &RetentionPolicy, newest: Time) {
    if let Some(days) = retention.max_age_days {
        let cutoff = newest - Duration::days(days);
        while log.front().is_some_and(|r| r.timestamp() < cutoff) {
            log.pop_front();
        }
    }

    if let Some(max) = retention.max_entries {
        while log.len() > max {
            log.pop_front();
        }
    }
}
