use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle phase of the single live job.
///
/// `Failed` carries its error detail as variant data, so a detail string can
/// only exist while the job is failed. The whole value serializes into the
/// `status` store key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Completed,
    Failed {
        error: String,
    },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "IDLE"),
            Phase::Pending => write!(f, "PENDING"),
            Phase::Completed => write!(f, "COMPLETED"),
            Phase::Failed { .. } => write!(f, "FAILED"),
        }
    }
}

/// The kind of a generated quiz question.
///
/// Kinds the service may add later arrive as [`QuizKind::Other`]: they still
/// render and count toward the score denominator, but take no answer and are
/// never correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuizKind {
    /// Free-text question with a blanked-out term.
    FillBlank,
    /// Two-choice question answered with "O" or "X".
    TrueFalse,
    /// Anything this client does not recognize, kept verbatim.
    Other(String),
}

impl From<String> for QuizKind {
    fn from(raw: String) -> Self {
        // The service emits "blank"/"ox"; older deployments used the Korean
        // labels, and snake_case shows up in hand-written fixtures.
        match raw.trim().to_lowercase().as_str() {
            "blank" | "빈칸" | "fill_blank" | "fill-blank" => QuizKind::FillBlank,
            "ox" | "o/x" | "true_false" | "true-false" => QuizKind::TrueFalse,
            _ => QuizKind::Other(raw),
        }
    }
}

impl From<QuizKind> for String {
    fn from(kind: QuizKind) -> Self {
        match kind {
            QuizKind::FillBlank => "blank".to_string(),
            QuizKind::TrueFalse => "ox".to_string(),
            QuizKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::FillBlank => write!(f, "blank"),
            QuizKind::TrueFalse => write!(f, "O/X"),
            QuizKind::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One generated question. Immutable once produced by the service and
/// identified by its position in the quiz.
///
/// Field names mirror the service wire format, so the same value round-trips
/// through both the HTTP response and the `quizzes` store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    #[serde(rename = "type")]
    pub kind: QuizKind,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "answer")]
    pub answer_key: String,
}

/// Output of one completed job. Written wholesale on success, never
/// partially updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub transcript: String,
    pub summary: String,
    pub quiz_items: Vec<QuizItem>,
}

/// Structured record printed after a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub job_id: String,
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub transcript_chars: usize,
    pub summary_chars: usize,
    pub quiz_count: usize,
}

impl SubmissionReport {
    pub fn new(
        file_name: &str,
        submitted_at: DateTime<Utc>,
        result: &ProcessingResult,
    ) -> Self {
        let completed_at = Utc::now();
        Self {
            job_id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            submitted_at,
            completed_at,
            duration_ms: (completed_at - submitted_at).num_milliseconds(),
            transcript_chars: result.transcript.chars().count(),
            summary_chars: result.summary.chars().count(),
            quiz_count: result.quiz_items.len(),
        }
    }
}
