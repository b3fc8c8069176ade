//! Errors encoding requests or decoding service responses.

/// A body that could not be encoded or a response that did not match the
/// expected shape.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What went wrong
    pub message: String,
    /// Service call whose response failed to decode, if any
    pub operation: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Encoding failure or other JSON problem not tied to a response.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::JsonError;
    ///
    /// let err = JsonError::new("Failed to encode page ids: key must be a string");
    /// assert!(err.operation.is_none());
    /// assert!(err.to_string().starts_with("JSON Error: Failed to encode page ids"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            operation: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The `operation` response could not be decoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::JsonError;
    ///
    /// let err = JsonError::response("list pages", "missing field `pages`");
    /// assert_eq!(err.operation.as_deref(), Some("list pages"));
    /// assert_eq!(err.message, "Failed to parse list pages response: missing field `pages`");
    /// ```
    #[track_caller]
    pub fn response(operation: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        let operation = operation.into();
        let location = std::panic::Location::caller();
        Self {
            message: format!("Failed to parse {} response: {}", operation, detail),
            operation: Some(operation),
            line: location.line(),
            file: location.file(),
        }
    }
}
