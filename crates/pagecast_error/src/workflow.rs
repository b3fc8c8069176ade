//! Workflow state errors.

use derive_getters::Getters;

/// Illegal workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// A submission for this workflow is already in flight.
    #[display("A submission is already in progress")]
    AlreadySubmitting,

    /// The workflow has no active target (e.g. the boost modal is closed).
    #[display("Workflow is not open")]
    NotOpen,

    /// A response arrived for a submission that was since abandoned.
    #[display("Response belongs to an abandoned submission")]
    StaleResponse,

    /// The requested action is not allowed from the current state.
    #[display("Cannot {} while {}", action, state)]
    InvalidTransition {
        /// State the workflow was in
        state: String,
        /// Action that was attempted
        action: String,
    },
}

/// Workflow error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    kind: WorkflowErrorKind,
    line: u32,
    file: &'static str,
}

impl WorkflowError {
    /// Create a new workflow error with caller location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an [`WorkflowErrorKind::InvalidTransition`].
    #[track_caller]
    pub fn invalid(state: impl ToString, action: impl Into<String>) -> Self {
        Self::new(WorkflowErrorKind::InvalidTransition {
            state: state.to_string(),
            action: action.into(),
        })
    }
}
