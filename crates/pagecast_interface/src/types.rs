//! Wire shapes of the publishing service responses.

use derive_getters::Getters;
use pagecast_core::{
    Audience, AudienceEstimate, CampaignRecord, CampaignStatus, DashboardOverview, Interest,
    PostPerformance, PublishSummary, ScheduledPost, Target, TargetOutcome,
};
use pagecast_error::SubmissionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common response wrapper: `{success, error?, ...body}`.
///
/// The body fields are flattened next to `success`, so every payload type
/// defaults its fields; an error response then still deserializes.
///
/// # Examples
///
/// ```
/// use pagecast_interface::{Envelope, MessagePayload};
///
/// let ok: Envelope<MessagePayload> =
///     serde_json::from_str(r#"{"success":true,"message":"saved"}"#).unwrap();
/// assert_eq!(ok.into_result("save settings").unwrap().message, "saved");
///
/// let rejected: Envelope<MessagePayload> =
///     serde_json::from_str(r#"{"success":false,"error":"Token missing"}"#).unwrap();
/// let err = rejected.into_result("save settings").unwrap_err();
/// assert_eq!(err.message(), "Token missing");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Explicit success flag; absent on some listing endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Service-provided failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Operation-specific body
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    /// Successful body wrapper.
    pub fn ok(body: T) -> Self {
        Self {
            success: Some(true),
            error: None,
            body,
        }
    }

    /// Unwrap the body, or turn an explicit rejection into a [`SubmissionError`].
    #[track_caller]
    pub fn into_result(self, operation: &str) -> Result<T, SubmissionError> {
        if let Some(message) = self.error {
            return Err(SubmissionError::new(operation, message));
        }
        if self.success == Some(false) {
            return Err(SubmissionError::new(operation, "Request rejected"));
        }
        Ok(self.body)
    }
}

/// Body of the page listing and page sync responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetsPayload {
    /// Pages
    #[serde(default)]
    pub pages: Vec<Target>,
    /// Human-readable sync summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of the multi-page publish response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishPayload {
    /// Per-page results keyed by page id
    #[serde(default)]
    pub results: BTreeMap<String, TargetOutcome>,
    /// Counts; derived from `results` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PublishSummary>,
}

/// Body of the post details response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailsPayload {
    /// The post, when found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<PostDetails>,
}

/// Body of the campaign listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignsPayload {
    /// Campaigns
    #[serde(default)]
    pub campaigns: Vec<CampaignRecord>,
}

/// Body of the campaign toggle response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePayload {
    /// Status the service applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<CampaignStatus>,
}

/// Body of the audience listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudiencesPayload {
    /// Audiences
    #[serde(default)]
    pub audiences: Vec<Audience>,
}

/// Body of single-audience responses (create, update, duplicate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudiencePayload {
    /// The stored audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
}

/// Body of the audience size estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudienceEstimatePayload {
    /// The estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<AudienceEstimate>,
}

/// Body of the interest search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestsPayload {
    /// Matches, at most ten
    #[serde(default)]
    pub interests: Vec<Interest>,
    /// Query as the service understood it
    #[serde(default)]
    pub query: String,
}

/// Body of the scheduled posts listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPostsPayload {
    /// Queued posts
    #[serde(default)]
    pub scheduled_posts: Vec<ScheduledPost>,
}

/// Body of the dashboard response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardPayload {
    /// Figures
    #[serde(default)]
    pub data: DashboardOverview,
}

/// Body of acknowledgements that only carry a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Confirmation text
    #[serde(default)]
    pub message: String,
}

/// Result of checking the stored credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCheck {
    /// Whether Facebook accepted the credentials
    #[serde(default)]
    pub success: bool,
    /// Detail from the service
    #[serde(default)]
    pub message: String,
}

/// Page a post belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    /// Page id
    #[serde(default)]
    pub id: String,
    /// Page name
    #[serde(default)]
    pub name: String,
}

/// Interaction figures of one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInsights {
    /// People reached
    #[serde(default)]
    pub reach: u64,
    /// Total interactions
    #[serde(default)]
    pub engagement: u64,
    /// Link clicks
    #[serde(default)]
    pub clicks: u64,
    /// Shares
    #[serde(default)]
    pub shares: u64,
}

/// Attached media of one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMedia {
    /// `image` or `video`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Public URL
    #[serde(default)]
    pub url: String,
}

/// A post as shown in the boost preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PostDetails {
    id: String,
    #[serde(default)]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_time: Option<String>,
    #[serde(default)]
    page: PostPage,
    #[serde(default)]
    insights: PostInsights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media: Option<PostMedia>,
    /// Set when the details were rebuilt from a cached listing entry.
    #[serde(skip)]
    from_cache: bool,
}

impl PostDetails {
    /// Details with only an id and message.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Attach the owning page.
    pub fn with_page(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.page = PostPage {
            id: id.into(),
            name: name.into(),
        };
        self
    }

    /// Rebuild details from a post-performance listing entry.
    ///
    /// Click counts and media are not part of the listing and stay empty.
    pub fn from_summary(post: &PostPerformance) -> Self {
        Self {
            id: post.id().clone(),
            message: post.message().clone(),
            created_time: post.created_time().map(|t| t.to_rfc3339()),
            page: PostPage {
                id: post.page_id().clone(),
                name: post.page_name().clone(),
            },
            insights: PostInsights {
                reach: *post.reach(),
                engagement: *post.engagement(),
                clicks: 0,
                shares: *post.shares(),
            },
            media: None,
            from_cache: true,
        }
    }

    /// Preview text cut to `max` characters with an ellipsis.
    pub fn excerpt(&self, max: usize) -> String {
        if self.message.chars().count() <= max {
            return self.message.clone();
        }
        let cut: String = self.message.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_wins_over_success_flag() {
        let env: Envelope<MessagePayload> =
            serde_json::from_str(r#"{"success":true,"error":"odd"}"#).unwrap();
        assert!(env.into_result("x").is_err());
    }

    #[test]
    fn listing_without_success_flag_is_ok() {
        let env: Envelope<TargetsPayload> =
            serde_json::from_str(r#"{"pages":[{"id":"1","name":"A"}]}"#).unwrap();
        let body = env.into_result("list pages").unwrap();
        assert_eq!(body.pages.len(), 1);
    }

    #[test]
    fn publish_error_body_still_parses() {
        let env: Envelope<PublishPayload> =
            serde_json::from_str(r#"{"success":false,"error":"Aucune page"}"#).unwrap();
        let err = env.into_result("publish").unwrap_err();
        assert_eq!(err.operation(), "publish");
    }

    #[test]
    fn details_parse_nested_page_and_insights() {
        let json = r#"{"success":true,"post":{"id":"p1","message":"Terrasses",
            "created_time":"2025-06-20T10:30:00+0000",
            "page":{"id":"123","name":"Bois Malin"},
            "insights":{"reach":1250,"engagement":89,"clicks":23,"shares":12},
            "media":{"type":"image","url":"https://example.com/a.jpg"}}}"#;
        let env: Envelope<PostDetailsPayload> = serde_json::from_str(json).unwrap();
        let post = env.into_result("post details").unwrap().post.unwrap();
        assert_eq!(post.page().name, "Bois Malin");
        assert_eq!(post.insights().clicks, 23);
        assert!(!*post.from_cache());
    }

    #[test]
    fn summary_fallback_is_marked() {
        let summary = PostPerformance::new("p1", "123", "Bois Malin", "Hello")
            .with_metrics(100, 3, 1, 2);
        let details = PostDetails::from_summary(&summary);
        assert!(*details.from_cache());
        assert_eq!(details.insights().reach, 100);
        assert_eq!(details.insights().engagement, 6);
    }

    #[test]
    fn excerpt_cuts_on_characters() {
        let details = PostDetails::new("p", "Crème brûlée maison");
        assert_eq!(details.excerpt(5), "Crème...");
        assert_eq!(details.excerpt(100), "Crème brûlée maison");
    }
}
