//! Mood momentum over the most recent readings.

use rde_core::{Mood, MoodTrend, TrendConfig};
use tracing::debug;

use crate::StateLogs;

/// Classifies the direction recent moods are moving in.
///
/// Sums the successive score differences across the window, so it reacts
/// to the last few entries rather than smoothing over history.
#[derive(Debug, Clone, Default)]
pub struct MoodTrendAnalyzer {
    config: TrendConfig,
}

impl MoodTrendAnalyzer {
    /// Create an analyzer with the default window and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: TrendConfig) -> Self {
        self.config = config;
        self
    }

    /// Trend of the most recent moods in `logs`.
    pub fn trend(&self, logs: &StateLogs) -> MoodTrend {
        self.classify(&logs.recent_moods(self.config.window))
    }

    /// Trend of an ordered mood sequence, oldest first.
    ///
    /// Only the last `window` entries count; fewer than two is `stable`.
    pub fn classify(&self, moods: &[Mood]) -> MoodTrend {
        let start = moods.len().saturating_sub(self.config.window);
        let window = &moods[start..];

        if window.len() < 2 {
            return MoodTrend::Stable;
        }

        let momentum: f64 = window
            .windows(2)
            .map(|pair| pair[1].score() - pair[0].score())
            .sum();

        let trend = if momentum > self.config.positive_threshold {
            MoodTrend::Positive
        } else if momentum < self.config.negative_threshold {
            MoodTrend::Negative
        } else {
            MoodTrend::Stable
        };

        debug!("Mood momentum {:.2} over {} readings: {}", momentum, window.len(), trend);
        trend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_readings_is_stable() {
        let analyzer = MoodTrendAnalyzer::new();
        assert_eq!(analyzer.classify(&[]), MoodTrend::Stable);
        assert_eq!(analyzer.classify(&[Mood::Happy]), MoodTrend::Stable);
        assert_eq!(analyzer.trend(&StateLogs::new()), MoodTrend::Stable);
    }

    #[test]
    fn test_sad_to_happy_is_positive() {
        let analyzer = MoodTrendAnalyzer::new();
        let moods = [Mood::Sad, Mood::Sad, Mood::Happy, Mood::Happy, Mood::Happy];
        assert_eq!(analyzer.classify(&moods), MoodTrend::Positive);
    }

    #[test]
    fn test_happy_to_sad_is_negative() {
        let analyzer = MoodTrendAnalyzer::new();
        assert_eq!(analyzer.classify(&[Mood::Happy, Mood::Neutral, Mood::Sad]), MoodTrend::Negative);
    }

    #[test]
    fn test_exact_threshold_is_stable() {
        // neutral -> happy sums to exactly 1.0, which is not > 1
        let analyzer = MoodTrendAnalyzer::new();
        assert_eq!(analyzer.classify(&[Mood::Neutral, Mood::Happy]), MoodTrend::Stable);
        // tired -> anxious -> tired nets out
        assert_eq!(
            analyzer.classify(&[Mood::Tired, Mood::Anxious, Mood::Tired]),
            MoodTrend::Stable
        );
    }

    #[test]
    fn test_only_the_window_counts() {
        let analyzer = MoodTrendAnalyzer::new();
        // The early drop from happy to sad falls outside the last five
        let moods = [
            Mood::Happy,
            Mood::Sad,
            Mood::Sad,
            Mood::Sad,
            Mood::Neutral,
            Mood::Happy,
        ];
        assert_eq!(analyzer.classify(&moods), MoodTrend::Positive);

        let narrow = MoodTrendAnalyzer::new().with_config(TrendConfig {
            window: 2,
            ..Default::default()
        });
        assert_eq!(narrow.classify(&moods), MoodTrend::Stable);
    }

    #[test]
    fn test_trend_reads_from_logs() {
        let mut logs = StateLogs::new();
        for mood in [Mood::Happy, Mood::Neutral, Mood::Tired, Mood::Sad] {
            logs.append_mood(mood, None);
        }
        assert_eq!(MoodTrendAnalyzer::new().trend(&logs), MoodTrend::Negative);
    }
}
