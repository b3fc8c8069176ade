//! Partial multi-page publish failures.

use derive_getters::Getters;

/// One page that rejected its share of a multi-page publish.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FailedTarget {
    target_id: String,
    message: String,
}

impl FailedTarget {
    /// Record a failed page and the reason the service gave.
    pub fn new(target_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            message: message.into(),
        }
    }
}

/// The publish as a whole was accepted but at least one page failed.
///
/// Successful pages are not rolled back and the publish form is not reset.
#[derive(Debug, Clone, derive_more::Error, Getters)]
pub struct PartialOutcomeError {
    failed: Vec<FailedTarget>,
    succeeded: usize,
    line: u32,
    file: &'static str,
}

impl PartialOutcomeError {
    /// Create a new partial outcome error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::{FailedTarget, PartialOutcomeError};
    ///
    /// let err = PartialOutcomeError::new(vec![FailedTarget::new("p2", "token expired")], 1);
    /// assert_eq!(err.failed().len(), 1);
    /// assert_eq!(*err.succeeded(), 1);
    /// ```
    #[track_caller]
    pub fn new(failed: Vec<FailedTarget>, succeeded: usize) -> Self {
        let location = std::panic::Location::caller();
        Self {
            failed,
            succeeded,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for PartialOutcomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Partial Outcome: {} of {} pages failed at line {} in {}",
            self.failed.len(),
            self.failed.len() + self.succeeded,
            self.line,
            self.file
        )
    }
}
