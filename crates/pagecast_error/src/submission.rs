//! Server-reported submission failures.

use derive_getters::Getters;

/// The remote service answered but reported an explicit failure.
///
/// Form data is preserved by every workflow that returns this error so the
/// user can correct it and retry.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Submission Error ({}): {} at line {} in {}", operation, message, line, file)]
pub struct SubmissionError {
    /// Operation that was rejected (e.g. "publish", "boost")
    operation: String,
    /// Message returned by the service
    message: String,
    /// HTTP status, when the rejection came with one
    status: Option<u16>,
    line: u32,
    file: &'static str,
}

impl SubmissionError {
    /// Create a new SubmissionError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::SubmissionError;
    ///
    /// let err = SubmissionError::new("boost", "Budget too low");
    /// assert_eq!(err.message(), "Budget too low");
    /// assert!(err.status().is_none());
    /// ```
    #[track_caller]
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the HTTP status the rejection arrived with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}
