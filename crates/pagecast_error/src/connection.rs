//! Transport-level errors.

/// The request failed before a usable response arrived.
///
/// Covers DNS/connect failures, timeouts and unreadable response bodies.
/// Treated like a [`crate::SubmissionError`] by the workflows but logged separately.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Connection Error: {} at line {} in {}", message, line, file)]
pub struct ConnectionError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConnectionError {
    /// Create a new ConnectionError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::ConnectionError;
    ///
    /// let err = ConnectionError::new("Connection refused");
    /// assert!(err.message.contains("refused"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
