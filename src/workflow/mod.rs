mod job;
mod machine;

pub use job::{Phase, ProcessingResult, QuizItem, QuizKind, SubmissionReport};
pub use machine::{Generation, TransitionError, WorkflowMachine};
