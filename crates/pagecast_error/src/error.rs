//! Top-level error wrapper types.

use crate::{
    AuthError, ConfigError, ConnectionError, JsonError, PartialOutcomeError, SubmissionError,
    ValidationError, WorkflowError,
};

/// Every error condition the console can surface.
///
/// # Examples
///
/// ```
/// use pagecast_error::{ConnectionError, PagecastError};
///
/// let err: PagecastError = ConnectionError::new("timed out").into();
/// assert!(format!("{}", err).contains("Connection Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PagecastErrorKind {
    /// Client-side validation failure
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Server-reported failure
    #[from(SubmissionError)]
    Submission(SubmissionError),
    /// Transport failure
    #[from(ConnectionError)]
    Connection(ConnectionError),
    /// Multi-page publish with failed pages
    #[from(PartialOutcomeError)]
    PartialOutcome(PartialOutcomeError),
    /// Illegal workflow transition
    #[from(WorkflowError)]
    Workflow(WorkflowError),
    /// Session rejected by the service
    #[from(AuthError)]
    Auth(AuthError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Pagecast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use pagecast_error::{PagecastErrorKind, PagecastResult, ValidationError, ValidationErrorKind};
///
/// fn might_fail() -> PagecastResult<()> {
///     Err(ValidationError::new(ValidationErrorKind::EmptyMessage))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), PagecastErrorKind::Validation(_)));
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Pagecast Error: {}", _0)]
pub struct PagecastError(Box<PagecastErrorKind>);

impl PagecastError {
    /// Create a new error from a kind.
    pub fn new(kind: PagecastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PagecastErrorKind {
        &self.0
    }

    /// Whether the user can retry, with the same or edited data, from where they are.
    ///
    /// Configuration and authentication failures need action outside the form.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind(),
            PagecastErrorKind::Config(_) | PagecastErrorKind::Auth(_)
        )
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self.kind() {
            PagecastErrorKind::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// Short text suitable for a transient notification.
    pub fn notice_text(&self) -> String {
        match self.kind() {
            PagecastErrorKind::Validation(e) => e.kind().to_string(),
            PagecastErrorKind::Submission(e) => e.message().clone(),
            PagecastErrorKind::Connection(_) => "Connection error".to_string(),
            PagecastErrorKind::PartialOutcome(e) => format!(
                "Published to {} page(s), {} failed",
                e.succeeded(),
                e.failed().len()
            ),
            PagecastErrorKind::Workflow(e) => e.kind().to_string(),
            PagecastErrorKind::Auth(_) => "Session expired, please sign in again".to_string(),
            PagecastErrorKind::Config(e) => e.message.clone(),
            PagecastErrorKind::Json(e) => match &e.operation {
                Some(operation) => format!("Unexpected {} response from the service", operation),
                None => "Unexpected response from the service".to_string(),
            },
        }
    }
}

// Generic From implementation for any type that converts to PagecastErrorKind
impl<T> From<T> for PagecastError
where
    T: Into<PagecastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Pagecast operations.
pub type PagecastResult<T> = std::result::Result<T, PagecastError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailedTarget, ValidationErrorKind};

    #[test]
    fn validation_errors_are_recoverable() {
        let err: PagecastError = ValidationError::new(ValidationErrorKind::EmptyMessage).into();
        assert!(err.is_recoverable());
        assert_eq!(err.notice_text(), "Message is required");
    }

    #[test]
    fn auth_errors_are_not_recoverable() {
        let err: PagecastError = AuthError::new("401").into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn connection_notice_hides_transport_detail() {
        let err: PagecastError = ConnectionError::new("tcp connect error: refused").into();
        assert_eq!(err.notice_text(), "Connection error");
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn partial_outcome_notice_counts_pages() {
        let err: PagecastError =
            PartialOutcomeError::new(vec![FailedTarget::new("p2", "denied")], 3).into();
        assert_eq!(err.notice_text(), "Published to 3 page(s), 1 failed");
        assert!(err.to_string().contains("1 of 4 pages failed"));
    }

    #[test]
    fn json_notice_names_the_failed_call() {
        let err: PagecastError = JsonError::response("list campaigns", "expected a sequence").into();
        assert_eq!(
            err.notice_text(),
            "Unexpected list campaigns response from the service"
        );

        let err: PagecastError = JsonError::new("Failed to encode page ids").into();
        assert_eq!(err.notice_text(), "Unexpected response from the service");
    }

    #[test]
    fn config_notice_names_the_key() {
        let err: PagecastError =
            ConfigError::invalid_value("publish.progress_cap", "must be at most 99, got 100").into();
        assert_eq!(
            err.notice_text(),
            "publish.progress_cap must be at most 99, got 100"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn location_is_captured() {
        let err: &'static ValidationError =
            Box::leak(Box::new(ValidationError::new(ValidationErrorKind::NoTargetsSelected)));
        assert!(err.file().ends_with("error.rs"));
        assert!(*err.line() > 0);
    }
}
