//! clap-based command-line interface.
//!
//! Each subcommand is one visit to the app: state is restored from the
//! persisted store, one action is applied, and the process exits.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lectio: turn lecture recordings into transcripts, summaries, and
/// self-grading quizzes.
#[derive(Debug, Parser)]
#[command(name = "lectio", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the persisted state file.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Base URL of the processing service.
    #[arg(long, global = true)]
    pub service_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a recording for transcription, summarization, and quiz
    /// generation.
    Submit {
        /// Path to the audio file.
        file: PathBuf,
    },

    /// Show the current workflow phase and next steps.
    Status,

    /// Show the transcript of the last processed lecture.
    Transcript,

    /// Show the summary of the last processed lecture.
    Summary,

    /// Show the quiz with your current answers (or results once graded).
    Quiz,

    /// Record an answer to one quiz question.
    Answer {
        /// Question number as shown by `lectio quiz` (starting at 1).
        number: usize,

        /// Your answer. O/X questions take O or X.
        value: String,
    },

    /// Lock your answers and show correctness and the score.
    Grade,

    /// Clear all answers and take the quiz again.
    Retry,

    /// Discard the lecture, its results, and your answers.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_submit_subcommand() {
        let cli = Cli::parse_from(["lectio", "submit", "lecture01.wav"]);
        match cli.command {
            Command::Submit { file } => {
                assert_eq!(file, PathBuf::from("lecture01.wav"));
            }
            _ => panic!("expected Submit command"),
        }
    }

    #[test]
    fn cli_parses_answer_subcommand() {
        let cli = Cli::parse_from(["lectio", "answer", "2", "X"]);
        match cli.command {
            Command::Answer { number, value } => {
                assert_eq!(number, 2);
                assert_eq!(value, "X");
            }
            _ => panic!("expected Answer command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "lectio",
            "--store",
            "/tmp/state.json",
            "--service-url",
            "http://localhost:9000",
            "status",
        ]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/state.json")));
        assert_eq!(cli.service_url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
