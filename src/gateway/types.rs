//! Wire types for the processing service.
//!
//! One endpoint, `POST /process-lecture/`: the service takes an audio file
//! and answers with the transcript, a summary, and the generated quiz in a
//! single body.

use serde::{Deserialize, Serialize};

use crate::workflow::{ProcessingResult, QuizItem};

/// Success body of `POST /process-lecture/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessLectureResponse {
    /// Name the service stored the upload under. Informational only.
    #[serde(default)]
    pub filename: String,
    pub transcription: String,
    pub summary: String,
    #[serde(default)]
    pub quizzes: Vec<QuizItem>,
}

impl From<ProcessLectureResponse> for ProcessingResult {
    fn from(response: ProcessLectureResponse) -> Self {
        ProcessingResult {
            transcript: response.transcription,
            summary: response.summary,
            quiz_items: response.quizzes,
        }
    }
}

/// Body the service sends on non-success statuses. Application errors use
/// `error`; framework validation errors use `detail`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub detail: String,
}

impl ErrorBody {
    pub fn message(&self) -> &str {
        if !self.error.is_empty() {
            &self.error
        } else {
            &self.detail
        }
    }
}
