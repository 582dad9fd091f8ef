use crate::error::{FormError, Result};
use tracing::debug;

/// Lifecycle of the single outstanding submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Resolved,
    Rejected,
}

/// Events that move a submission attempt through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// A valid form was submitted.
    Start,
    /// The remote call settled successfully.
    Succeed,
    /// The remote call settled with a failure.
    Fail,
    /// A settled attempt is cleared so a new one can begin.
    Reset,
}

#[derive(Debug, Default)]
pub struct SubmissionStateMachine {
    status: SubmissionStatus,
    attempts: u64,
}

impl SubmissionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_transition(&self, event: SubmissionEvent) -> bool {
        self.next(event).is_some()
    }

    /// Performs a transition, rejecting anything outside the lifecycle table.
    pub fn transition(&mut self, event: SubmissionEvent) -> Result<SubmissionStatus> {
        let next = self.next(event).ok_or(FormError::InvalidTransition {
            from: self.status,
            event,
        })?;
        if event == SubmissionEvent::Start {
            self.attempts += 1;
        }
        debug!(from = ?self.status, to = ?next, attempt = self.attempts, "submission transition");
        self.status = next;
        Ok(next)
    }

    fn next(&self, event: SubmissionEvent) -> Option<SubmissionStatus> {
        use SubmissionEvent as E;
        use SubmissionStatus as S;
        match (self.status, event) {
            (S::Idle, E::Start) => Some(S::Pending),
            (S::Pending, E::Succeed) => Some(S::Resolved),
            (S::Pending, E::Fail) => Some(S::Rejected),
            (S::Resolved | S::Rejected, E::Reset) => Some(S::Idle),
            _ => None,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Resolved | SubmissionStatus::Rejected
        )
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}
