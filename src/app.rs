//! Command orchestration: wires the store, the gateway, the workflow
//! machine, and the grading engine together.
//!
//! Every handler restores its state from the store, applies one user
//! action, and persists before returning, so any sequence of process
//! invocations behaves like one continuous session.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use chrono::Utc;

use crate::gateway::LectureProcessor;
use crate::grading::GradingEngine;
use crate::store::Store;
use crate::views::{self, Navigator, UploadProgress, View};
use crate::workflow::{
    ProcessingResult, QuizKind, SubmissionReport, TransitionError, WorkflowMachine,
};

pub struct App<'a, S: Store, P: LectureProcessor, N: Navigator> {
    store: &'a S,
    gateway: P,
    navigator: N,
}

impl<'a, S: Store, P: LectureProcessor, N: Navigator> App<'a, S, P, N> {
    pub fn new(store: &'a S, gateway: P, navigator: N) -> Self {
        Self {
            store,
            gateway,
            navigator,
        }
    }

    /// Submit one audio file and drive the job to completion or failure.
    ///
    /// Gateway failures become the `Failed` phase with a display message,
    /// never an error return; only local problems (unreadable or empty
    /// file) error out before the workflow is touched.
    pub async fn submit(&mut self, path: &Path) -> Result<()> {
        let audio = std::fs::read(path)
            .with_context(|| format!("could not read audio file {}", path.display()))?;
        ensure!(!audio.is_empty(), "audio file {} is empty", path.display());
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lecture".to_string());

        let mut machine = WorkflowMachine::restore(self.store);
        let token = match machine.begin_submit() {
            Ok(token) => token,
            Err(reason) => {
                println!("Submission not started: {reason}.");
                match reason {
                    TransitionError::SubmissionInProgress => {
                        println!("If a previous run was interrupted, run `lectio reset` first.");
                    }
                    TransitionError::ResultPresent => {
                        println!("Run `lectio reset` to discard the current results.");
                    }
                    _ => {}
                }
                return Ok(());
            }
        };

        let submitted_at = Utc::now();
        let progress = UploadProgress::start(&file_name);
        match self.gateway.process_lecture(&file_name, audio).await {
            Ok(response) => {
                let result = ProcessingResult::from(response);
                let report = SubmissionReport::new(&file_name, submitted_at, &result);
                match machine.complete(token, result) {
                    Ok(()) => {
                        progress.succeed();
                        views::print_report(&report);
                        self.navigator.go_to(View::Transcript);
                    }
                    // The submission was superseded while the call was in
                    // flight; the result is discarded.
                    Err(_) => progress.discard(),
                }
            }
            Err(error) => {
                let message = error.display_message();
                progress.fail(&message);
                if machine.fail(token, message).is_ok() {
                    println!(
                        "Submit again with `lectio submit <audio-file>` or start over with `lectio reset`."
                    );
                }
            }
        }
        Ok(())
    }

    /// Record the answer for question `number` (1-based, as shown by
    /// `lectio quiz`).
    pub fn answer(&mut self, number: usize, value: &str) -> Result<()> {
        let mut engine = GradingEngine::load(self.store);
        let total = engine.items().len();
        if total == 0 {
            println!("{}", views::quiz_view(self.store));
            return Ok(());
        }
        ensure!(
            (1..=total).contains(&number),
            "question {number} does not exist (the quiz has {total} questions)"
        );
        if engine.revealed() {
            println!("The quiz is already graded. Run `lectio retry` to answer again.");
            return Ok(());
        }

        let index = number - 1;
        match &engine.items()[index].kind {
            QuizKind::Other(kind) => {
                println!("Question {number} ({kind}) does not take an answer.");
                return Ok(());
            }
            QuizKind::TrueFalse => {
                let normalized = value.trim().to_uppercase();
                ensure!(
                    normalized == "O" || normalized == "X",
                    "question {number} is O/X: answer with O or X"
                );
            }
            QuizKind::FillBlank => {}
        }

        engine.record_answer(index, value);
        println!("Recorded answer for question {number}.");
        Ok(())
    }

    /// Finalize grading and show the graded quiz. Idempotent.
    pub fn grade(&mut self) {
        let mut engine = GradingEngine::load(self.store);
        if engine.items().is_empty() {
            println!("{}", views::quiz_view(self.store));
            return;
        }
        engine.submit_for_grading();
        self.navigator.go_to(View::Quiz);
    }

    /// Clear all answers so the quiz can be taken again.
    pub fn retry(&mut self) {
        let mut engine = GradingEngine::load(self.store);
        if engine.items().is_empty() {
            println!("{}", views::quiz_view(self.store));
            return;
        }
        engine.retry();
        println!("Answers cleared. The quiz can be taken again.");
    }

    /// Discard the whole workflow: results, answers, and phase.
    pub fn reset(&mut self) {
        let mut machine = WorkflowMachine::restore(self.store);
        machine.reset();
        println!("Workflow reset. {}", views::SUBMIT_HINT);
    }

    pub fn status(&self) {
        views::render(View::Status, self.store);
    }
}
