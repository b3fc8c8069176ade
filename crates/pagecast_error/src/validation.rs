//! Client-side validation errors.
//!
//! Validation errors are raised before a request is assembled and are never
//! sent over the network. They are always recoverable by editing the form.

use derive_getters::Getters;

/// Specific validation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// The publish message is empty after trimming.
    #[display("Message is required")]
    EmptyMessage,

    /// No destination page is selected.
    #[display("Select at least one page")]
    NoTargetsSelected,

    /// The boost form is missing required values.
    #[display("Incomplete boost form: {}", _0)]
    IncompleteBoostForm(String),

    /// A campaign wizard step failed its advance checks.
    #[display("Campaign step {} is incomplete: {}", step, reason)]
    CampaignStep {
        /// Wizard step number (1-based)
        step: u8,
        /// Human readable list of failed checks
        reason: String,
    },

    /// A search query is shorter than the service accepts.
    #[display("Search needs at least {} characters", min)]
    SearchTooShort {
        /// Minimum number of characters
        min: usize,
    },

    /// A required field is missing.
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// A field value is present but unusable.
    #[display("Invalid value for '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Validation error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    line: u32,
    file: &'static str,
}

impl ValidationError {
    /// Create a new validation error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::{ValidationError, ValidationErrorKind};
    ///
    /// let err = ValidationError::new(ValidationErrorKind::NoTargetsSelected);
    /// assert_eq!(err.kind(), &ValidationErrorKind::NoTargetsSelected);
    /// ```
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
