//! Coaching text generated from a reflection and its category pattern.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rde_core::{CategoryPattern, Emotion, Outcome, TaskReflection};
use tracing::debug;

/// Turns a reflection into an ordered list of guidance lines.
///
/// Output order:
/// ```text
/// one line per known emotion → best-time line (if known) → success-rate summary
/// ```
/// Template choice is random; pass a seeded or mock RNG for repeatable output.
pub struct GuidanceGenerator<R: RngCore = StdRng> {
    rng: R,
}

impl GuidanceGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Create a generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for GuidanceGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> GuidanceGenerator<R> {
    /// Create a generator drawing from the given RNG.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate guidance for a reflection.
    ///
    /// `pattern` is the category's pattern after the reflection was
    /// recorded, or `None` if the category has no history.
    pub fn generate(&mut self, reflection: &TaskReflection, pattern: Option<&CategoryPattern>) -> Vec<String> {
        let mut guidance = Vec::new();
        let category = reflection.category.as_str();

        for emotion in reflection.known_emotions() {
            if let Some(line) = templates(emotion, reflection.outcome).choose(&mut self.rng) {
                guidance.push((*line).to_string());
            }
        }

        if let Some(bucket) = pattern.and_then(|p| p.best_time_of_day.as_deref()) {
            guidance.push(match reflection.outcome {
                Outcome::Positive => format!(
                    "You're most successful with {category}s around {bucket}. Keep utilizing this timing!"
                ),
                Outcome::Negative => format!(
                    "Consider scheduling your next {category} around {bucket}, when you've had the most success."
                ),
            });
        }

        let tail = match reflection.outcome {
            Outcome::Positive => "Keep up the great work!",
            Outcome::Negative => "Each attempt brings valuable learning.",
        };
        guidance.push(match pattern.filter(|p| p.total_count > 0) {
            Some(p) => format!(
                "Your overall success rate with {category}s is {}%. {tail}",
                (p.success_rate * 100.0).round() as i64
            ),
            None => format!("Not enough data yet to measure your success rate with {category}s. {tail}"),
        });

        debug!("Generated {} guidance lines for '{}'", guidance.len(), category);
        guidance
    }
}

fn templates(emotion: Emotion, outcome: Outcome) -> &'static [&'static str] {
    match (emotion, outcome) {
        (Emotion::Anxious, Outcome::Positive) => &[
            "Your preparation paid off! Remember this feeling of success for next time.",
            "You handled any anxiety well. Each success builds your confidence.",
            "Great job staying focused despite the pressure. You're developing strong coping skills.",
        ],
        (Emotion::Anxious, Outcome::Negative) => &[
            "Anxiety is normal. Next time, try a 5-minute breathing exercise before you start.",
            "Consider breaking it down into smaller, manageable parts.",
            "What if we prepared a simple outline before your next attempt?",
        ],
        (Emotion::Overwhelmed, Outcome::Positive) => &[
            "You managed the complexity well! Your organizational skills are improving.",
            "See how breaking it down made it manageable? Remember this strategy!",
            "You turned overwhelm into accomplishment. That's real growth!",
        ],
        (Emotion::Overwhelmed, Outcome::Negative) => &[
            "Let's make the next one shorter or break it into parts.",
            "Would having an agenda help you feel more in control?",
            "Remember: progress over perfection. Each attempt is a learning opportunity.",
        ],
        (Emotion::Distracted, Outcome::Positive) => &[
            "You maintained focus when it mattered! Your strategies are working.",
            "Great job staying on track. What techniques helped you most?",
            "You're getting better at managing distractions. Keep building on this!",
        ],
        (Emotion::Distracted, Outcome::Negative) => &[
            "Next time, try the Pomodoro technique to maintain focus.",
            "Would a different environment help reduce distractions?",
            "Let's identify your peak focus hours for important work.",
        ],
        (Emotion::Confident, Outcome::Positive) => &[
            "Your confidence was well-placed! Keep building on this success.",
            "You're developing a strong presence. Notice what worked well.",
            "This success reinforces your capabilities. Remember this feeling!",
        ],
        (Emotion::Confident, Outcome::Negative) => &[
            "Your confidence to try is valuable. Each attempt builds experience.",
            "What aspects of your preparation gave you confidence? Let's build on those.",
            "You had the courage to try. That's a kind of success too.",
        ],
    }
}
