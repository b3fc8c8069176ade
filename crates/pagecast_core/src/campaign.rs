//! Campaign drafts assembled by the creation wizard.

use crate::{AudienceMode, CustomTargeting, Objective};
use chrono::{DateTime, NaiveDate, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Creative layout of an ad.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdFormat {
    /// One image
    SingleImage,
    /// One video
    Video,
    /// Several swipeable cards
    Carousel,
}

/// Button shown on an ad.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CallToAction {
    /// "Learn more"
    LearnMore,
    /// "Shop now"
    ShopNow,
    /// "Sign up"
    SignUp,
    /// "Contact us"
    ContactUs,
    /// "Get quote"
    GetQuote,
}

/// Step 1 record: the campaign itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Campaign {
    name: String,
    objective: Objective,
    #[serde(rename = "budget")]
    total_budget: f64,
}

impl Campaign {
    /// Create a campaign record.
    pub fn new(name: impl Into<String>, objective: Objective, total_budget: f64) -> Self {
        Self {
            name: name.into(),
            objective,
            total_budget,
        }
    }
}

/// Step 2 record: the ad set (audience, budget, schedule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct AdSet {
    name: String,
    #[serde(rename = "audienceType")]
    audience_mode: AudienceMode,
    daily_budget: f64,
    start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
    #[serde(
        rename = "savedAudience",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    saved_audience_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    targeting: Option<CustomTargeting>,
}

impl AdSet {
    /// Create an ad set record.
    ///
    /// Only the audience data relevant to `audience_mode` is kept.
    pub fn new(
        name: impl Into<String>,
        audience_mode: AudienceMode,
        daily_budget: f64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        saved_audience_id: Option<String>,
        targeting: Option<CustomTargeting>,
    ) -> Self {
        let (saved_audience_id, targeting) = match audience_mode {
            AudienceMode::Auto => (None, None),
            AudienceMode::Custom => (None, targeting),
            AudienceMode::Saved => (saved_audience_id, None),
        };
        Self {
            name: name.into(),
            audience_mode,
            daily_budget,
            start_date,
            end_date,
            saved_audience_id,
            targeting,
        }
    }
}

/// Step 3 record: the ad creative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    name: String,
    format: AdFormat,
    page_id: String,
    headline: String,
    #[serde(rename = "text")]
    body_text: String,
    description: String,
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    destination_url: Option<String>,
    call_to_action: CallToAction,
}

impl Ad {
    /// Advisory length limit for the headline.
    pub const HEADLINE_MAX: usize = 40;
    /// Advisory length limit for the body text.
    pub const BODY_MAX: usize = 125;
    /// Advisory length limit for the description.
    pub const DESCRIPTION_MAX: usize = 30;

    /// Create an ad record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        format: AdFormat,
        page_id: impl Into<String>,
        headline: impl Into<String>,
        body_text: impl Into<String>,
        description: impl Into<String>,
        destination_url: Option<String>,
        call_to_action: CallToAction,
    ) -> Self {
        Self {
            name: name.into(),
            format,
            page_id: page_id.into(),
            headline: headline.into(),
            body_text: body_text.into(),
            description: description.into(),
            destination_url,
            call_to_action,
        }
    }
}

/// Advisory character counter for a length-limited field.
///
/// # Examples
///
/// ```
/// use pagecast_core::CharCounter;
///
/// let counter = CharCounter::new("Fresh bread daily", 40);
/// assert_eq!(counter.to_string(), "17/40");
/// assert!(!counter.over_limit());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{}/{}", len, max)]
pub struct CharCounter {
    len: usize,
    max: usize,
}

impl CharCounter {
    /// Count characters (not bytes) of `text` against `max`.
    pub fn new(text: &str, max: usize) -> Self {
        Self {
            len: text.chars().count(),
            max,
        }
    }

    /// Current length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the text exceeds the advisory limit.
    pub fn over_limit(&self) -> bool {
        self.len > self.max
    }
}

/// The Campaign/AdSet/Ad hierarchy accumulated across wizard steps.
///
/// Each part is `None` until its wizard step has passed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    /// Step 1 result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<Campaign>,
    /// Step 2 result
    #[serde(rename = "adset", default, skip_serializing_if = "Option::is_none")]
    pub ad_set: Option<AdSet>,
    /// Step 3 result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad: Option<Ad>,
}

impl CampaignDraft {
    /// Whether all three parts are present.
    pub fn is_complete(&self) -> bool {
        self.campaign.is_some() && self.ad_set.is_some() && self.ad.is_some()
    }

    /// Performance estimate derived from the ad set's daily budget.
    pub fn estimate(&self) -> CampaignEstimate {
        CampaignEstimate::from_daily_budget(
            self.ad_set.as_ref().map(|a| a.daily_budget).unwrap_or(0.0),
        )
    }
}

/// Rough per-day performance estimate shown on the review step.
///
/// This is a display aid, not a forecast.
///
/// # Examples
///
/// ```
/// use pagecast_core::CampaignEstimate;
///
/// let estimate = CampaignEstimate::from_daily_budget(10.0);
/// assert_eq!(*estimate.reach(), 500);
/// assert_eq!(*estimate.clicks(), 20);
/// assert_eq!(*estimate.cost_per_click(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct CampaignEstimate {
    reach: u64,
    clicks: u64,
    cost_per_click: f64,
}

impl CampaignEstimate {
    /// Derive the estimate from a daily budget.
    pub fn from_daily_budget(daily_budget: f64) -> Self {
        let budget = daily_budget.max(0.0);
        let reach = (budget * 50.0).round() as u64;
        let clicks = (budget * 2.0).round() as u64;
        let cost_per_click = if clicks > 0 {
            ((budget / clicks as f64) * 100.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            reach,
            clicks,
            cost_per_click,
        }
    }
}

/// Delivery status of an existing campaign.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CampaignStatus {
    /// Delivering
    Active,
    /// Stopped by the advertiser
    Paused,
}

impl CampaignStatus {
    /// The status a toggle moves to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
        }
    }
}

/// An existing campaign as listed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CampaignRecord {
    id: String,
    name: String,
    objective: Objective,
    status: CampaignStatus,
    #[serde(default)]
    budget: f64,
    #[serde(default)]
    spent: f64,
    #[serde(default)]
    reach: u64,
    #[serde(default)]
    clicks: u64,
    #[serde(default, with = "crate::analytics::graph_time")]
    created_time: Option<DateTime<Utc>>,
}

impl CampaignRecord {
    /// Fraction of the budget already spent, clamped to `[0, 1]`.
    pub fn spend_ratio(&self) -> f64 {
        if self.budget <= 0.0 {
            return 0.0;
        }
        (self.spent / self.budget).clamp(0.0, 1.0)
    }

    /// Average cost per click so far.
    pub fn cost_per_click(&self) -> f64 {
        if self.clicks == 0 {
            0.0
        } else {
            self.spent / self.clicks as f64
        }
    }
}

/// Service acknowledgement of a created campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignReceipt {
    /// Identifier assigned by the service
    #[serde(default)]
    pub campaign_id: Option<String>,
}
