//! Authentication errors.

/// The service rejected the session credentials (HTTP 401).
///
/// By the time this error is returned the stored token has already been
/// discarded and the login redirect hook has fired.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", message, line, file)]
pub struct AuthError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with the given message at the current location.
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
