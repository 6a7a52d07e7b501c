use thiserror::Error;

use super::job::{Phase, ProcessingResult};
use crate::store::{Store, StoreExt, keys};

/// Why a transition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a submission is already being processed")]
    SubmissionInProgress,

    #[error("a completed result exists")]
    ResultPresent,

    #[error("no submission is pending")]
    NotPending,

    #[error("the response belongs to a superseded submission")]
    Superseded,
}

/// Token tying a gateway response back to the submit attempt that started
/// it. Responses presented with a stale token are discarded, so a reset
/// issued while a call is in flight can never be reanimated by the late
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Drives the submit → pending → completed/failed lifecycle and keeps the
/// current phase persisted under the `status` key.
///
/// Exactly one job is live at a time. Each transition method validates its
/// precondition and returns a [`TransitionError`] when rejected; callers
/// treat `Ok` as "accepted" and decide per call site whether a rejection is
/// user-visible or silently discarded.
pub struct WorkflowMachine<'a, S: Store> {
    store: &'a S,
    phase: Phase,
    generation: u64,
}

impl<'a, S: Store> WorkflowMachine<'a, S> {
    /// Restore the machine from the store alone. Absent or corrupt state
    /// restores to `Idle`.
    ///
    /// A restored `Pending` phase means a previous process died mid-call;
    /// there is no request to re-attach to, so the only way out is
    /// [`reset`](Self::reset).
    pub fn restore(store: &'a S) -> Self {
        let phase = store.get_json(keys::STATUS);
        Self {
            store,
            phase,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error_detail(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// `Idle`/`Failed` → `Pending`. Returns the generation token the caller
    /// must present when the gateway call resolves.
    ///
    /// Submitting over a completed result is rejected; the user has to reset
    /// first. Submitting after a failure is allowed directly.
    pub fn begin_submit(&mut self) -> Result<Generation, TransitionError> {
        match self.phase {
            Phase::Idle | Phase::Failed { .. } => {
                self.generation += 1;
                self.set_phase(Phase::Pending);
                Ok(Generation(self.generation))
            }
            Phase::Pending => Err(TransitionError::SubmissionInProgress),
            Phase::Completed => Err(TransitionError::ResultPresent),
        }
    }

    /// `Pending` → `Completed`. Stores the result wholesale and clears any
    /// grading session left over from a previous quiz.
    pub fn complete(
        &mut self,
        token: Generation,
        result: ProcessingResult,
    ) -> Result<(), TransitionError> {
        self.check_pending(token)?;
        self.store.set(keys::TRANSCRIPT, &result.transcript);
        self.store.set(keys::SUMMARY, &result.summary);
        self.store.set_json(keys::QUIZZES, &result.quiz_items);
        self.store.delete(keys::USER_ANSWERS);
        self.store.delete(keys::SHOW_RESULTS);
        self.set_phase(Phase::Completed);
        Ok(())
    }

    /// `Pending` → `Failed`. Results from an earlier successful job are left
    /// in place; only a reset or a new success replaces them.
    pub fn fail(
        &mut self,
        token: Generation,
        message: impl Into<String>,
    ) -> Result<(), TransitionError> {
        self.check_pending(token)?;
        self.set_phase(Phase::Failed {
            error: message.into(),
        });
        Ok(())
    }

    /// Any phase → `Idle`. Deletes every store key and supersedes whatever
    /// call may still be in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        for key in keys::ALL {
            self.store.delete(key);
        }
        self.phase = Phase::Idle;
    }

    fn check_pending(&self, token: Generation) -> Result<(), TransitionError> {
        if token.0 != self.generation {
            return Err(TransitionError::Superseded);
        }
        if self.phase != Phase::Pending {
            return Err(TransitionError::NotPending);
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.store.set_json(keys::STATUS, &self.phase);
    }
}
