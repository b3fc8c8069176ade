//! Saved audiences reusable across boosts and campaigns.

use derive_builder::Builder;
use derive_getters::Getters;
use pagecast_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// How an audience was defined.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AudienceKind {
    /// Demographic and interest criteria
    #[default]
    Custom,
    /// Interest-only criteria
    Interest,
    /// Derived from an existing source audience
    Lookalike,
}

/// A saved audience as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Audience {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    kind: AudienceKind,
    /// Targeting payload; its shape depends on `kind`.
    #[serde(default)]
    targeting: serde_json::Value,
    #[serde(default)]
    size: u64,
}

impl Audience {
    /// Create an audience record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AudienceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            targeting: serde_json::Value::Null,
            size: 0,
        }
    }

    /// Set the estimated size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Label used in pickers, e.g. `Bricoleurs (32000)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.size)
    }
}

/// Fields sent to create or update an audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct AudienceDraft {
    name: String,
    description: String,
    #[serde(rename = "type")]
    #[builder(default)]
    kind: AudienceKind,
    #[builder(default)]
    targeting: serde_json::Value,
}

impl AudienceDraft {
    /// Start building a draft.
    pub fn builder() -> AudienceDraftBuilder {
        AudienceDraftBuilder::default()
    }

    /// Draft pre-filled from an existing audience, for editing.
    pub fn from_audience(audience: &Audience) -> Self {
        Self {
            name: audience.name.clone(),
            description: audience.description.clone(),
            kind: audience.kind,
            targeting: audience.targeting.clone(),
        }
    }

    /// Name and description are required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingField(
                "name".to_string(),
            )));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingField(
                "description".to_string(),
            )));
        }
        Ok(())
    }
}

/// Targeting sent to the service for a size estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AudienceEstimateRequest {
    targeting: serde_json::Value,
    #[serde(rename = "type")]
    kind: AudienceKind,
}

impl AudienceEstimateRequest {
    /// Estimate for `targeting` interpreted as a `kind` audience.
    pub fn new(targeting: serde_json::Value, kind: AudienceKind) -> Self {
        Self { targeting, kind }
    }

    /// Targeting must be a JSON object.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.targeting {
            serde_json::Value::Object(_) => Ok(()),
            serde_json::Value::Null => Err(ValidationError::new(
                ValidationErrorKind::MissingField("targeting".to_string()),
            )),
            _ => Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: "targeting".to_string(),
                reason: "expected an object".to_string(),
            })),
        }
    }
}

/// Tone of an estimate recommendation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecommendationKind {
    /// Audience likely too small
    Warning,
    /// Audience likely too broad
    #[default]
    Info,
    /// Optional refinement
    Tip,
    /// Nothing to change
    Success,
}

/// Advice attached to a size estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AudienceRecommendation {
    #[serde(rename = "type", default)]
    kind: RecommendationKind,
    #[serde(default)]
    message: String,
    #[serde(default)]
    suggestion: String,
}

/// Cost side of a size estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Cost per thousand impressions
    #[serde(default)]
    pub cpm: f64,
    /// Daily budget the service suggests
    #[serde(default)]
    pub suggested_daily_budget: f64,
    /// People reached per day at the suggested budget
    #[serde(default)]
    pub estimated_daily_reach: u64,
}

/// Estimated size and cost of a targeting definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AudienceEstimate {
    #[serde(default)]
    size: u64,
    /// Service label such as `Élevé`, `Moyen` or `Faible`.
    #[serde(default)]
    reach_potential: String,
    #[serde(default)]
    recommendations: Vec<AudienceRecommendation>,
    #[serde(default)]
    cost_estimate: CostEstimate,
}

/// An interest usable in custom targeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Interest {
    id: String,
    name: String,
    #[serde(default)]
    category: String,
}

impl Interest {
    /// Create an interest entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Interest search text, trimmed and at least two characters long.
///
/// # Examples
///
/// ```
/// use pagecast_core::InterestQuery;
///
/// assert_eq!(InterestQuery::new("  bois ").unwrap().as_str(), "bois");
/// assert!(InterestQuery::new(" b ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterestQuery(String);

impl InterestQuery {
    /// Shortest query the service answers.
    pub const MIN_LEN: usize = 2;

    /// Trim `raw` and check its length in characters.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < Self::MIN_LEN {
            return Err(ValidationError::new(ValidationErrorKind::SearchTooShort {
                min: Self::MIN_LEN,
            }));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_field() {
        let json = r#"{"id":"a1","name":"Clients","type":"lookalike","size":28000,
            "targeting":{"location":"FR","similarity":1}}"#;
        let audience: Audience = serde_json::from_str(json).unwrap();
        assert_eq!(*audience.kind(), AudienceKind::Lookalike);
        assert_eq!(audience.targeting()["location"], "FR");
        assert_eq!(audience.label(), "Clients (28000)");
    }

    #[test]
    fn draft_requires_description() {
        let draft = AudienceDraft::builder()
            .name("Bricoleurs")
            .description("   ")
            .build()
            .unwrap();
        let err = draft.validate().unwrap_err();
        assert_eq!(
            *err.kind(),
            ValidationErrorKind::MissingField("description".to_string())
        );
    }

    #[test]
    fn draft_from_audience_keeps_fields() {
        let audience = Audience::new("a", "Owners", AudienceKind::Custom).with_description("25-55");
        let draft = AudienceDraft::from_audience(&audience);
        assert!(draft.validate().is_ok());
        assert_eq!(draft.name(), "Owners");
    }

    #[test]
    fn interest_query_counts_characters_not_bytes() {
        assert!(InterestQuery::new("é").is_err());
        assert_eq!(InterestQuery::new("éé").unwrap().as_str(), "éé");
        let err = InterestQuery::new("  ").unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::SearchTooShort { min: 2 }
        );
    }

    #[test]
    fn estimate_request_needs_targeting_object() {
        let missing = AudienceEstimateRequest::new(serde_json::Value::Null, AudienceKind::Custom);
        assert_eq!(
            missing.validate().unwrap_err().kind(),
            &ValidationErrorKind::MissingField("targeting".to_string())
        );

        let ok = AudienceEstimateRequest::new(
            serde_json::json!({"age_min": 25, "interests": ["bois"]}),
            AudienceKind::Lookalike,
        );
        assert!(ok.validate().is_ok());
        let wire = serde_json::to_value(&ok).unwrap();
        assert_eq!(wire["type"], "lookalike");
    }

    #[test]
    fn estimate_parses_service_shape() {
        let json = r#"{
            "size": 120000,
            "reach_potential": "Élevé",
            "recommendations": [
                {"type": "success", "message": "Taille optimale", "suggestion": "Rien à changer"}
            ],
            "cost_estimate": {"cpm": 15, "suggested_daily_budget": 50, "estimated_daily_reach": 3333}
        }"#;
        let estimate: AudienceEstimate = serde_json::from_str(json).unwrap();
        assert_eq!(*estimate.size(), 120000);
        assert_eq!(*estimate.recommendations()[0].kind(), RecommendationKind::Success);
        assert_eq!(estimate.cost_estimate().estimated_daily_reach, 3333);
    }
}
