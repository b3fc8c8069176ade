//! Destination pages.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Whether the service can currently publish to a page.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    /// Page token is valid
    #[default]
    #[serde(alias = "Connected", alias = "Connectée")]
    Connected,
    /// Page token is missing or revoked
    #[serde(alias = "Disconnected", alias = "Déconnectée")]
    Disconnected,
}

/// A Facebook Page that content can be published to.
///
/// Identity is the `id`; two targets with the same id are the same page.
///
/// # Examples
///
/// ```
/// use pagecast_core::{ConnectionStatus, Target};
///
/// let page = Target::new("123", "Corner Bakery").with_followers(1_250);
/// assert_eq!(page.id(), "123");
/// assert_eq!(*page.status(), ConnectionStatus::Connected);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct Target {
    #[setters(skip)]
    id: String,
    #[setters(into)]
    name: String,
    #[serde(default, alias = "fan_count")]
    followers: u64,
    #[serde(default)]
    #[setters(into)]
    category: String,
    #[serde(default)]
    status: ConnectionStatus,
}

impl Target {
    /// Create a connected page with no follower or category information.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            followers: 0,
            category: String::new(),
            status: ConnectionStatus::Connected,
        }
    }

    /// Whether the page can be published to right now.
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_service_page_listing() {
        let json = r#"{"id":"42","name":"Bois Malin","category":"Local business",
            "fan_count":1250,"status":"Connectée"}"#;
        let page: Target = serde_json::from_str(json).unwrap();
        assert_eq!(*page.followers(), 1250);
        assert!(page.is_connected());
    }

    #[test]
    fn setters_keep_identity() {
        let page = Target::new("1", "Old").with_name("New").with_category("Shop");
        assert_eq!(page.id(), "1");
        assert_eq!(page.name(), "New");
    }
}
