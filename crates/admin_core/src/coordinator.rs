//! Mutation coordinators: one per write verb, each a small state machine.
//! `settle` is a pure reducer from a task outcome to the effect list; the
//! owning view applies the effects, which keeps the lifecycle testable
//! without any rendering or transport.

use crate::error::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationVerb {
    Create,
    Update,
    Delete,
}

/// Result of one settled mutation task.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    Success(T),
    Failure(RemoteError),
}

impl<T> From<Result<T, RemoteError>> for MutationOutcome<T> {
    fn from(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(value) => MutationOutcome::Success(value),
            Err(err) => MutationOutcome::Failure(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn success(message: String) -> Self {
        Self {
            severity: Severity::Success,
            title: "Successful!".into(),
            message,
        }
    }

    fn failure() -> Self {
        Self {
            severity: Severity::Error,
            title: "Error".into(),
            message: "Please try again later.".into(),
        }
    }
}

/// What the view must do after a settlement, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Mark the resource's cached list stale so the next read re-fetches.
    InvalidateList,
    Notify(Notification),
    /// Close the modal or drawer that initiated the mutation.
    CloseSurface,
    ClearDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a mutation is already in flight")]
pub struct MutationInFlight;

#[derive(Debug)]
pub struct MutationCoordinator {
    resource: &'static str,
    verb: MutationVerb,
    state: MutationState,
}

impl MutationCoordinator {
    pub fn new(resource: &'static str, verb: MutationVerb) -> Self {
        Self {
            resource,
            verb,
            state: MutationState::Idle,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == MutationState::InFlight
    }

    /// Arms the coordinator for one remote call. Refused while a call is
    /// pending; invocations are not deduplicated beyond that, so the view
    /// disables its trigger control off `is_in_flight`.
    pub fn begin(&mut self) -> Result<(), MutationInFlight> {
        if self.is_in_flight() {
            return Err(MutationInFlight);
        }
        self.state = MutationState::InFlight;
        Ok(())
    }

    /// Pure reducer over the settled outcome. Success invalidates the cached
    /// list, notifies, closes the initiating surface and clears the draft;
    /// failure only notifies, leaving the surface open and the draft intact
    /// for a retry.
    pub fn settle<T>(&mut self, outcome: &MutationOutcome<T>) -> Vec<Effect> {
        match outcome {
            MutationOutcome::Success(_) => {
                self.state = MutationState::Succeeded;
                vec![
                    Effect::InvalidateList,
                    Effect::Notify(Notification::success(self.success_message())),
                    Effect::CloseSurface,
                    Effect::ClearDraft,
                ]
            }
            MutationOutcome::Failure(err) => {
                self.state = MutationState::Failed;
                tracing::warn!(
                    resource = self.resource,
                    verb = ?self.verb,
                    error = %err,
                    "mutation failed"
                );
                vec![Effect::Notify(Notification::failure())]
            }
        }
    }

    fn success_message(&self) -> String {
        match self.verb {
            MutationVerb::Create => format!("New {} Created!", self.resource),
            MutationVerb::Update => format!("{} Updated Successfully!", self.resource),
            MutationVerb::Delete => format!("{} Deleted Successfully!", self.resource),
        }
    }
}
