//! Configuration loading and validation errors.

/// Configuration that could not be read, parsed or accepted.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted key of the offending setting, e.g. `publish.progress_cap`
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Error not attributable to a single setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to read configuration from pagecast.toml");
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// `key` holds a value outside its accepted range.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecast_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_value("publish.progress_tick_ms", "must be at least 1");
    /// assert_eq!(err.key.as_deref(), Some("publish.progress_tick_ms"));
    /// assert_eq!(err.message, "publish.progress_tick_ms must be at least 1");
    /// ```
    #[track_caller]
    pub fn invalid_value(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let key = key.into();
        let location = std::panic::Location::caller();
        Self {
            message: format!("{} {}", key, reason),
            key: Some(key),
            line: location.line(),
            file: location.file(),
        }
    }
}
