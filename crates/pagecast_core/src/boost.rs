//! Boost (post promotion) requests.

use crate::Objective;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// How the audience of a boost or ad set is chosen.
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
pub enum AudienceMode {
    /// Let the platform pick the audience
    #[default]
    Auto,
    /// Inline demographic targeting
    Custom,
    /// A previously saved audience
    Saved,
}

/// Gender filter for custom targeting.
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
pub enum Gender {
    /// No filter
    #[default]
    All,
    /// Men only
    Male,
    /// Women only
    Female,
}

/// Inline demographic targeting.
///
/// # Examples
///
/// ```
/// use pagecast_core::{CustomTargeting, Gender};
///
/// let targeting = CustomTargeting::builder()
///     .location("Rennes")
///     .age_min(30u8)
///     .interests(vec!["Gardening".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(targeting.location(), "Rennes");
/// assert_eq!(*targeting.age_max(), 55);
/// assert_eq!(*targeting.gender(), Gender::All);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(default)]
pub struct CustomTargeting {
    #[builder(setter(into))]
    location: String,
    age_min: u8,
    age_max: u8,
    gender: Gender,
    #[serde(default)]
    interests: Vec<String>,
}

impl Default for CustomTargeting {
    fn default() -> Self {
        Self {
            location: "France".to_string(),
            age_min: 25,
            age_max: 55,
            gender: Gender::All,
            interests: Vec::new(),
        }
    }
}

impl CustomTargeting {
    /// Creates a new targeting builder.
    pub fn builder() -> CustomTargetingBuilder {
        CustomTargetingBuilder::default()
    }

    /// Split a comma separated interest list, dropping blanks.
    pub fn parse_interests(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A validated request to promote one existing post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct BoostRequest {
    post_id: String,
    objective: Objective,
    daily_budget: f64,
    duration_days: u32,
    audience_mode: AudienceMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    targeting: Option<CustomTargeting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_audience_id: Option<String>,
}

impl BoostRequest {
    /// Assemble a request from already-validated form values.
    pub fn new(
        post_id: impl Into<String>,
        objective: Objective,
        daily_budget: f64,
        duration_days: u32,
        audience_mode: AudienceMode,
        targeting: Option<CustomTargeting>,
        saved_audience_id: Option<String>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            objective,
            daily_budget,
            duration_days,
            audience_mode,
            targeting,
            saved_audience_id,
        }
    }
}

/// Service acknowledgement of a boost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostReceipt {
    /// People the service expects to reach
    #[serde(default)]
    pub estimated_reach: u64,
}

/// Spend and reach summary shown next to the boost form.
///
/// # Examples
///
/// ```
/// use pagecast_core::BudgetSummary;
///
/// let summary = BudgetSummary::new(20.0, 7);
/// assert_eq!(summary.total(), 140.0);
/// assert_eq!(summary.reach_range(), (2_000, 3_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    daily_budget: f64,
    duration_days: u32,
}

impl BudgetSummary {
    /// People reached per currency unit of daily budget, before the spread.
    const REACH_PER_UNIT: f64 = 125.0;
    /// Relative spread of the displayed reach range.
    const REACH_SPREAD: f64 = 0.2;

    /// Summarize a daily budget over a number of days.
    pub fn new(daily_budget: f64, duration_days: u32) -> Self {
        Self {
            daily_budget,
            duration_days,
        }
    }

    /// Total spend over the whole boost.
    pub fn total(&self) -> f64 {
        self.daily_budget * f64::from(self.duration_days)
    }

    /// Estimated daily reach as a (min, max) pair.
    pub fn reach_range(&self) -> (u64, u64) {
        let mid = self.daily_budget.max(0.0) * Self::REACH_PER_UNIT;
        let min = (mid * (1.0 - Self::REACH_SPREAD)).round() as u64;
        let max = (mid * (1.0 + Self::REACH_SPREAD)).round() as u64;
        (min, max)
    }
}
