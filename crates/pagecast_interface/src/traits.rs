//! The publishing service seen from the console.

use crate::{ConnectionCheck, PostDetails};
use async_trait::async_trait;
use pagecast_core::{
    Audience, AudienceDraft, AudienceEstimate, AudienceEstimateRequest, BoostReceipt,
    BoostRequest, CampaignDraft, CampaignReceipt, CampaignRecord, CampaignStatus,
    DashboardOverview, Interest, InterestQuery, PostsReport, PublishOutcome, PublishRequest,
    ScheduledPost, Settings, SettingsUpdate, Target,
};
use pagecast_error::PagecastResult;

/// Remote operations the console depends on.
///
/// Implementations map transport failures to `ConnectionError`, explicit
/// service rejections to `SubmissionError` and HTTP 401 to `AuthError`.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// Pages known to the service.
    async fn list_targets(&self) -> PagecastResult<Vec<Target>>;

    /// Ask the service to refresh its page list from Facebook.
    async fn sync_targets(&self) -> PagecastResult<Vec<Target>>;

    /// Publish one post to several pages.
    async fn publish(&self, request: &PublishRequest) -> PagecastResult<PublishOutcome>;

    /// Recent posts with their performance figures.
    async fn posts_performance(&self) -> PagecastResult<PostsReport>;

    /// Detailed view of one post, shown before boosting it.
    async fn post_details(&self, post_id: &str) -> PagecastResult<PostDetails>;

    /// Promote an existing post.
    async fn boost(&self, request: &BoostRequest) -> PagecastResult<BoostReceipt>;

    /// Create a campaign with its ad set and ad.
    async fn submit_campaign(&self, draft: &CampaignDraft) -> PagecastResult<CampaignReceipt>;

    /// Existing campaigns.
    async fn list_campaigns(&self) -> PagecastResult<Vec<CampaignRecord>>;

    /// Set a campaign's status; returns the status the service applied.
    async fn toggle_campaign(
        &self,
        campaign_id: &str,
        status: CampaignStatus,
    ) -> PagecastResult<CampaignStatus>;

    /// Delete a campaign.
    async fn delete_campaign(&self, campaign_id: &str) -> PagecastResult<()>;

    /// Saved audiences.
    async fn list_audiences(&self) -> PagecastResult<Vec<Audience>>;

    /// Save a new audience.
    async fn create_audience(&self, draft: &AudienceDraft) -> PagecastResult<Audience>;

    /// Replace an audience's definition.
    async fn update_audience(
        &self,
        audience_id: &str,
        draft: &AudienceDraft,
    ) -> PagecastResult<Audience>;

    /// Delete an audience.
    async fn delete_audience(&self, audience_id: &str) -> PagecastResult<()>;

    /// Copy an audience under a new id.
    async fn duplicate_audience(&self, audience_id: &str) -> PagecastResult<Audience>;

    /// Estimated size, cost and advice for a targeting definition.
    async fn estimate_audience(
        &self,
        request: &AudienceEstimateRequest,
    ) -> PagecastResult<AudienceEstimate>;

    /// Interests whose name or id contains the query, at most ten.
    async fn search_interests(&self, query: &InterestQuery) -> PagecastResult<Vec<Interest>>;

    /// Stored settings, secrets masked.
    async fn settings(&self) -> PagecastResult<Settings>;

    /// Store new credentials and preferences.
    async fn save_settings(&self, update: &SettingsUpdate) -> PagecastResult<()>;

    /// Check the stored credentials against Facebook.
    async fn test_connection(&self) -> PagecastResult<ConnectionCheck>;

    /// Dashboard headline figures.
    async fn dashboard(&self) -> PagecastResult<DashboardOverview>;

    /// Posts queued for later publication.
    async fn scheduled_posts(&self) -> PagecastResult<Vec<ScheduledPost>>;
}
