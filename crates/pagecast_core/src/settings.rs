//! Service credentials and console preferences.

use derive_getters::Getters;
use pagecast_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_TIMEZONE: &str = "Europe/Paris";

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Settings as reported by the service.
///
/// Secrets are never returned; the service masks them and only their
/// presence is kept here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Settings {
    #[serde(default)]
    app_id: String,
    #[serde(
        rename(deserialize = "app_secret"),
        alias = "has_app_secret",
        default,
        deserialize_with = "secret_present"
    )]
    has_app_secret: bool,
    #[serde(
        rename(deserialize = "access_token"),
        alias = "has_access_token",
        default,
        deserialize_with = "secret_present"
    )]
    has_access_token: bool,
    #[serde(default)]
    email_notifications: bool,
    #[serde(default)]
    auto_reports: bool,
    #[serde(default = "default_timezone")]
    timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            has_app_secret: false,
            has_access_token: false,
            email_notifications: false,
            auto_reports: false,
            timezone: default_timezone(),
        }
    }
}

impl Settings {
    /// Whether all credentials needed to reach the Graph API are stored.
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && self.has_app_secret && self.has_access_token
    }
}

/// Masked secrets arrive as `"***"` or `""`; booleans are accepted as well.
fn secret_present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Masked {
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<Masked>::deserialize(deserializer)? {
        Some(Masked::Flag(flag)) => flag,
        Some(Masked::Text(text)) => !text.is_empty(),
        None => false,
    })
}

/// New credentials and preferences to store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SettingsUpdate {
    app_id: String,
    app_secret: String,
    access_token: String,
    email_notifications: bool,
    auto_reports: bool,
    timezone: String,
}

impl SettingsUpdate {
    /// Credentials with default preferences.
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            access_token: access_token.into(),
            email_notifications: false,
            auto_reports: false,
            timezone: default_timezone(),
        }
    }

    /// Set notification preferences.
    pub fn with_notifications(mut self, email: bool, auto_reports: bool) -> Self {
        self.email_notifications = email;
        self.auto_reports = auto_reports;
        self
    }

    /// Set the reporting timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// All three credentials must be present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("app_id", &self.app_id),
            ("app_secret", &self.app_secret),
            ("access_token", &self.access_token),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ValidationError::new(ValidationErrorKind::MissingField(
                (*name).to_string(),
            ))),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for SettingsUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsUpdate")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("email_notifications", &self.email_notifications)
            .field("auto_reports", &self.auto_reports)
            .field("timezone", &self.timezone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_secrets_become_flags() {
        let json = r#"{"app_id":"123","app_secret":"***","access_token":"",
            "email_notifications":true,"timezone":"Europe/Brussels"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(*settings.has_app_secret());
        assert!(!*settings.has_access_token());
        assert!(!settings.is_configured());
        assert_eq!(settings.timezone(), "Europe/Brussels");
    }

    #[test]
    fn timezone_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.timezone(), "Europe/Paris");
    }

    #[test]
    fn update_debug_hides_secrets() {
        let update = SettingsUpdate::new("123", "s3cr3t", "EAAB-token");
        let printed = format!("{update:?}");
        assert!(!printed.contains("s3cr3t"));
        assert!(!printed.contains("EAAB-token"));
        assert!(printed.contains("123"));
    }

    #[test]
    fn update_requires_all_credentials() {
        let err = SettingsUpdate::new("123", "secret", " ").validate().unwrap_err();
        assert_eq!(
            *err.kind(),
            ValidationErrorKind::MissingField("access_token".to_string())
        );
    }
}
