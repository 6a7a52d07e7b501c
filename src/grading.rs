//! Quiz grading engine.
//!
//! Grades user answers against the generated answer key and keeps the
//! session (answers plus the revealed flag) persisted, so a half-finished
//! quiz survives a process restart. The quiz items themselves are an
//! immutable input read from the store; the engine never modifies them.

use std::fmt;

use crate::store::{Store, StoreExt, keys};
use crate::workflow::{QuizItem, QuizKind};

/// Aggregate result: correct answers over total questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

pub struct GradingEngine<'a, S: Store> {
    store: &'a S,
    items: Vec<QuizItem>,
    responses: Vec<String>,
    revealed: bool,
}

impl<'a, S: Store> GradingEngine<'a, S> {
    /// Load the current quiz and any saved session from the store.
    ///
    /// A saved session whose length does not match the quiz belongs to an
    /// earlier quiz (or is corrupt) and is discarded.
    pub fn load(store: &'a S) -> Self {
        let items: Vec<QuizItem> = store.get_json(keys::QUIZZES);
        let mut responses: Vec<String> = store.get_json(keys::USER_ANSWERS);
        let mut revealed: bool = store.get_json(keys::SHOW_RESULTS);
        if responses.len() != items.len() {
            responses = vec![String::new(); items.len()];
            revealed = false;
        }
        Self {
            store,
            items,
            responses,
            revealed,
        }
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Record the user's answer for one question and persist immediately.
    ///
    /// An out-of-range index is a caller bug, not user input. Once grading
    /// has been revealed the inputs are locked and this is a no-op.
    pub fn record_answer(&mut self, index: usize, value: &str) {
        assert!(
            index < self.items.len(),
            "answer index {index} out of range for {} quiz items",
            self.items.len()
        );
        if self.revealed {
            return;
        }
        self.responses[index] = value.to_string();
        self.store.set_json(keys::USER_ANSWERS, &self.responses);
    }

    /// Lock answers and reveal correctness. Idempotent.
    pub fn submit_for_grading(&mut self) {
        if self.revealed {
            return;
        }
        self.revealed = true;
        self.store.set_json(keys::SHOW_RESULTS, &true);
    }

    /// Clear every answer and un-reveal, deleting the saved session.
    pub fn retry(&mut self) {
        self.responses = vec![String::new(); self.items.len()];
        self.revealed = false;
        self.store.delete(keys::USER_ANSWERS);
        self.store.delete(keys::SHOW_RESULTS);
    }

    /// Whether the answer at `index` matches the answer key.
    ///
    /// Both sides are trimmed and case-folded before an exact comparison;
    /// that is the whole algorithm, with no partial credit. An empty key or
    /// response is never correct, and neither is a question of an
    /// unrecognized kind (it takes no answer in the first place).
    pub fn is_correct(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        if matches!(item.kind, QuizKind::Other(_)) {
            return false;
        }
        let key = normalize(&item.answer_key);
        let response = self
            .responses
            .get(index)
            .map(|r| normalize(r))
            .unwrap_or_default();
        !key.is_empty() && !response.is_empty() && key == response
    }

    /// Count of correct answers over the full quiz length. Unanswered and
    /// unrecognized questions count toward the denominator.
    pub fn score(&self) -> Score {
        let correct = (0..self.items.len()).filter(|&i| self.is_correct(i)).count();
        Score {
            correct,
            total: self.items.len(),
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
