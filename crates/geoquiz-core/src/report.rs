//! End-of-quiz summary with qualitative feedback and JSON persistence.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Qualitative feedback for a final score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Perfect,
    Excellent,
    Good,
    NotBad,
    NeedsImprovement,
}

impl Feedback {
    /// Map a percentage in `[0, 100]` onto the feedback bands.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Feedback::Perfect
        } else if percentage >= 80.0 {
            Feedback::Excellent
        } else if percentage >= 60.0 {
            Feedback::Good
        } else if percentage >= 40.0 {
            Feedback::NotBad
        } else {
            Feedback::NeedsImprovement
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Feedback::Perfect => "Perfect score! You're a geography master!",
            Feedback::Excellent => "Excellent! You really know your geography!",
            Feedback::Good => "Good job! You have a solid knowledge of geography.",
            Feedback::NotBad => "Not bad! Keep learning and you'll improve.",
            Feedback::NeedsImprovement => {
                "There's room for improvement. Try again to boost your geography knowledge!"
            }
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Score as a percentage of `total`; zero when there are no questions.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    // Multiply first so whole-number results (40, 60, 80) stay exact.
    score as f64 * 100.0 / total as f64
}

/// How a single question was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub prompt: String,
    /// The option the player picked, if any.
    pub chosen: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// A finished quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Identifier of the session this summary was taken from.
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub feedback: Feedback,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizSummary {
    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create summary directory {}", parent.display())
            })?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: QuizSummary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }

    /// Outcomes the player got wrong or skipped.
    pub fn missed(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_correct)
    }
}
