//! Terminal views for the transcript, summary, quiz, and workflow status,
//! plus the spinner shown while the processing service works.
//!
//! Every view reads its data from the store at render time and degrades to
//! a placeholder with a next-step hint when the data is absent. View bodies
//! are built as strings so tests can assert on them; [`render`] prints.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::grading::GradingEngine;
use crate::store::{Store, keys};
use crate::workflow::{Phase, QuizKind, SubmissionReport, WorkflowMachine};

pub const SUBMIT_HINT: &str = "Submit a recording first: lectio submit <audio-file>";

/// The four screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Status,
    Transcript,
    Summary,
    Quiz,
}

/// Moves the user to another view. Injected into the orchestration layer so
/// it stays independent of how views are shown.
pub trait Navigator {
    fn go_to(&mut self, view: View);
}

/// Renders the requested view straight to the terminal.
pub struct TerminalNavigator<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> TerminalNavigator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: Store> Navigator for TerminalNavigator<'_, S> {
    fn go_to(&mut self, view: View) {
        render(view, self.store);
    }
}

pub fn render<S: Store>(view: View, store: &S) {
    let body = match view {
        View::Status => status_view(store),
        View::Transcript => transcript_view(store),
        View::Summary => summary_view(store),
        View::Quiz => quiz_view(store),
    };
    println!("{body}");
}

fn placeholder(what: &str) -> String {
    let dim = Style::new().dim();
    format!("{}\n{SUBMIT_HINT}", dim.apply_to(format!("No {what} yet.")))
}

pub fn transcript_view<S: Store>(store: &S) -> String {
    let transcript = store.get(keys::TRANSCRIPT).unwrap_or_default();
    if transcript.trim().is_empty() {
        return placeholder("transcript");
    }
    format!("{}\n\n{transcript}", Style::new().bold().apply_to("Transcript"))
}

pub fn summary_view<S: Store>(store: &S) -> String {
    let summary = store.get(keys::SUMMARY).unwrap_or_default();
    if summary.trim().is_empty() {
        return placeholder("summary");
    }
    format!("{}\n\n{summary}", Style::new().bold().apply_to("Summary"))
}

pub fn quiz_view<S: Store>(store: &S) -> String {
    let engine = GradingEngine::load(store);
    if engine.items().is_empty() {
        return placeholder("quiz");
    }

    let bold = Style::new().bold();
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();
    let dim = Style::new().dim();

    let mut out = format!("{}\n", bold.apply_to("Quiz"));
    for (i, item) in engine.items().iter().enumerate() {
        let number = i + 1;
        out.push_str(&format!("\n{number}. [{}] {}\n", item.kind, item.prompt));

        if let QuizKind::Other(_) = item.kind {
            out.push_str(&format!("   {}\n", dim.apply_to("(not interactive)")));
            continue;
        }

        let response = engine.responses()[i].trim().to_string();
        if engine.revealed() {
            let mark = if engine.is_correct(i) {
                green.apply_to("✓ correct")
            } else {
                red.apply_to("✗ incorrect")
            };
            let shown = if response.is_empty() {
                "(no answer)".to_string()
            } else {
                response
            };
            out.push_str(&format!(
                "   {mark}: you answered {shown}, answer key: {}\n",
                item.answer_key
            ));
        } else {
            if item.kind == QuizKind::TrueFalse {
                out.push_str(&format!("   {}\n", dim.apply_to("(answer O or X)")));
            }
            if response.is_empty() {
                let hint = format!("(none, record one with: lectio answer {number} <value>)");
                out.push_str(&format!("   your answer: {}\n", dim.apply_to(hint)));
            } else {
                out.push_str(&format!("   your answer: {response}\n"));
            }
        }
    }

    if engine.revealed() {
        out.push_str(&format!("\n{} {}\n", bold.apply_to("Score:"), engine.score()));
    } else {
        out.push_str("\nRun `lectio grade` when you are done answering.\n");
    }
    out
}

pub fn status_view<S: Store>(store: &S) -> String {
    let machine = WorkflowMachine::restore(store);
    let bold = Style::new().bold();
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();
    let yellow = Style::new().yellow();

    let mut out = format!("{} {}\n", bold.apply_to("Phase:"), machine.phase());
    match machine.phase() {
        Phase::Idle => {
            out.push_str(&format!("{SUBMIT_HINT}\n"));
        }
        Phase::Pending => {
            out.push_str(&format!(
                "{}\n",
                yellow.apply_to("A submission was interrupted before it finished.")
            ));
            out.push_str(
                "The original request cannot be resumed. Run `lectio reset`, then submit again.\n",
            );
        }
        Phase::Completed => {
            out.push_str(&format!("{}\n", green.apply_to("Lecture processed.")));
            let engine = GradingEngine::load(store);
            if engine.revealed() {
                out.push_str(&format!("Quiz graded: {}\n", engine.score()));
            } else {
                let answered = engine
                    .responses()
                    .iter()
                    .filter(|r| !r.trim().is_empty())
                    .count();
                out.push_str(&format!(
                    "Quiz progress: {answered}/{} answered\n",
                    engine.items().len()
                ));
            }
            out.push_str("Views: lectio transcript | lectio summary | lectio quiz\n");
        }
        Phase::Failed { .. } => {
            let detail = machine.error_detail().unwrap_or("unknown error");
            out.push_str(&format!("{} {detail}\n", red.apply_to("Processing failed:")));
            out.push_str(
                "Submit again with `lectio submit <audio-file>` or start over with `lectio reset`.\n",
            );
        }
    }
    out
}

/// Prints the post-completion submission report, JSON-formatted.
pub fn print_report(report: &SubmissionReport) {
    let dim = Style::new().dim();
    println!();
    println!("{}", dim.apply_to("--- Submission Report ---"));
    println!(
        "{}",
        serde_json::to_string_pretty(report).unwrap_or_default()
    );
}

/// Spinner shown while the processing service works on a recording.
pub struct UploadProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
}

impl UploadProgress {
    pub fn start(file_name: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("Processing {file_name}..."));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    pub fn succeed(&self) {
        self.pb.finish_and_clear();
        println!("  {} Lecture processed", self.green.apply_to("✓"));
    }

    pub fn fail(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }

    /// Clears the spinner without a verdict, for responses that arrive after
    /// their submission was superseded.
    pub fn discard(&self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreExt};
    use crate::workflow::QuizItem;

    fn seed_quiz(store: &MemoryStore) {
        let items = vec![
            QuizItem {
                kind: QuizKind::FillBlank,
                prompt: "Capital of France?".into(),
                answer_key: "Paris".into(),
            },
            QuizItem {
                kind: QuizKind::TrueFalse,
                prompt: "Sun rises in the west.".into(),
                answer_key: "X".into(),
            },
        ];
        store.set_json(keys::QUIZZES, &items);
    }

    #[test]
    fn transcript_view_degrades_to_placeholder() {
        let store = MemoryStore::new();
        let body = transcript_view(&store);
        assert!(body.contains("No transcript yet."));
        assert!(body.contains("lectio submit"));
    }

    #[test]
    fn transcript_view_shows_stored_text() {
        let store = MemoryStore::new();
        store.set(keys::TRANSCRIPT, "Today we cover Paris.");
        let body = transcript_view(&store);
        assert!(body.contains("Today we cover Paris."));
        assert!(!body.contains("No transcript yet."));
    }

    #[test]
    fn summary_view_degrades_to_placeholder() {
        let store = MemoryStore::new();
        assert!(summary_view(&store).contains("No summary yet."));
    }

    #[test]
    fn quiz_view_degrades_to_placeholder() {
        let store = MemoryStore::new();
        assert!(quiz_view(&store).contains("No quiz yet."));
    }

    #[test]
    fn quiz_view_lists_questions_before_reveal() {
        let store = MemoryStore::new();
        seed_quiz(&store);
        store.set_json(keys::USER_ANSWERS, &vec!["paris".to_string(), String::new()]);

        let body = quiz_view(&store);
        assert!(body.contains("1. [blank] Capital of France?"));
        assert!(body.contains("2. [O/X] Sun rises in the west."));
        assert!(body.contains("your answer: paris"));
        assert!(body.contains("(answer O or X)"));
        assert!(body.contains("lectio grade"));
        // No answer key leaks before the reveal.
        assert!(!body.contains("answer key"));
    }

    #[test]
    fn quiz_view_shows_marks_and_score_after_reveal() {
        let store = MemoryStore::new();
        seed_quiz(&store);
        store.set_json(keys::USER_ANSWERS, &vec!["paris".to_string(), "O".to_string()]);
        store.set_json(keys::SHOW_RESULTS, &true);

        let body = quiz_view(&store);
        assert!(body.contains("✓ correct"));
        assert!(body.contains("✗ incorrect"));
        assert!(body.contains("answer key: X"));
        assert!(body.contains("Score:"));
        assert!(body.contains("1/2"));
    }

    #[test]
    fn quiz_view_marks_unknown_kinds_as_not_interactive() {
        let store = MemoryStore::new();
        let items = vec![QuizItem {
            kind: QuizKind::Other("essay".into()),
            prompt: "Discuss the lecture.".into(),
            answer_key: String::new(),
        }];
        store.set_json(keys::QUIZZES, &items);

        let body = quiz_view(&store);
        assert!(body.contains("Discuss the lecture."));
        assert!(body.contains("(not interactive)"));
    }

    #[test]
    fn status_view_idle() {
        let store = MemoryStore::new();
        let body = status_view(&store);
        assert!(body.contains("IDLE"));
        assert!(body.contains("lectio submit"));
    }

    #[test]
    fn status_view_interrupted_pending_offers_reset() {
        let store = MemoryStore::new();
        store.set(keys::STATUS, r#"{"phase":"pending"}"#);
        let body = status_view(&store);
        assert!(body.contains("PENDING"));
        assert!(body.contains("interrupted"));
        assert!(body.contains("lectio reset"));
    }

    #[test]
    fn status_view_failed_shows_detail_and_retry_hint() {
        let store = MemoryStore::new();
        store.set(
            keys::STATUS,
            r#"{"phase":"failed","error":"no speech detected"}"#,
        );
        let body = status_view(&store);
        assert!(body.contains("FAILED"));
        assert!(body.contains("no speech detected"));
        assert!(body.contains("lectio submit"));
        assert!(body.contains("lectio reset"));
    }

    #[test]
    fn status_view_completed_shows_quiz_progress() {
        let store = MemoryStore::new();
        store.set(keys::STATUS, r#"{"phase":"completed"}"#);
        seed_quiz(&store);
        store.set_json(keys::USER_ANSWERS, &vec!["paris".to_string(), String::new()]);

        let body = status_view(&store);
        assert!(body.contains("COMPLETED"));
        assert!(body.contains("1/2 answered"));
    }

    #[test]
    fn restart_resume_renders_persisted_results() {
        // Everything below reads from the store alone, as after a reload.
        let store = MemoryStore::new();
        store.set(keys::STATUS, r#"{"phase":"completed"}"#);
        store.set(keys::TRANSCRIPT, "persisted transcript");
        store.set(keys::SUMMARY, "persisted summary");
        seed_quiz(&store);

        assert!(transcript_view(&store).contains("persisted transcript"));
        assert!(summary_view(&store).contains("persisted summary"));
        assert!(quiz_view(&store).contains("Capital of France?"));
        assert!(status_view(&store).contains("COMPLETED"));
    }
}
