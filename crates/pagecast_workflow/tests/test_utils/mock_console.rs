//! In-memory `ConsoleApi` with scripted answers.

use async_trait::async_trait;
use pagecast_core::{
    Audience, AudienceDraft, AudienceEstimate, AudienceEstimateRequest, AudienceKind,
    BoostReceipt, BoostRequest, CampaignDraft, CampaignReceipt, CampaignRecord, CampaignStatus,
    DashboardOverview, Interest, InterestQuery, PostsReport, PublishOutcome, PublishRequest,
    ScheduledPost, Settings, SettingsUpdate, Target, TargetOutcome,
};
use pagecast_error::{PagecastResult, SubmissionError};
use pagecast_interface::{ConnectionCheck, ConsoleApi, PostDetails};
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

/// Answers queued per operation; an empty queue gives a successful default.
///
/// Every call is recorded by name so tests can assert on what was sent.
#[derive(Default)]
pub struct MockConsoleApi {
    publish: Mutex<VecDeque<PagecastResult<PublishOutcome>>>,
    post_details: Mutex<VecDeque<PagecastResult<PostDetails>>>,
    posts: Mutex<VecDeque<PagecastResult<PostsReport>>>,
    boost: Mutex<VecDeque<PagecastResult<BoostReceipt>>>,
    campaign: Mutex<VecDeque<PagecastResult<CampaignReceipt>>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    boosts: Mutex<Vec<BoostRequest>>,
    drafts: Mutex<Vec<CampaignDraft>>,
}

#[allow(dead_code)]
impl MockConsoleApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every publish, to let the progress ticker run.
    pub fn with_publish_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_publish(&self, result: PagecastResult<PublishOutcome>) {
        self.publish.lock().push_back(result);
    }

    pub fn queue_post_details(&self, result: PagecastResult<PostDetails>) {
        self.post_details.lock().push_back(result);
    }

    pub fn queue_posts(&self, result: PagecastResult<PostsReport>) {
        self.posts.lock().push_back(result);
    }

    pub fn queue_boost(&self, result: PagecastResult<BoostReceipt>) {
        self.boost.lock().push_back(result);
    }

    pub fn queue_campaign(&self, result: PagecastResult<CampaignReceipt>) {
        self.campaign.lock().push_back(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn boosts(&self) -> Vec<BoostRequest> {
        self.boosts.lock().clone()
    }

    pub fn drafts(&self) -> Vec<CampaignDraft> {
        self.drafts.lock().clone()
    }

    fn record(&self, name: &str) {
        self.calls.lock().push(name.to_string());
    }
}

fn not_mocked<T>(operation: &str) -> PagecastResult<T> {
    Err(SubmissionError::new(operation, "Not mocked").into())
}

#[async_trait]
impl ConsoleApi for MockConsoleApi {
    async fn list_targets(&self) -> PagecastResult<Vec<Target>> {
        self.record("list_targets");
        Ok(Vec::new())
    }

    async fn sync_targets(&self) -> PagecastResult<Vec<Target>> {
        self.record("sync_targets");
        Ok(Vec::new())
    }

    async fn publish(&self, request: &PublishRequest) -> PagecastResult<PublishOutcome> {
        self.record("publish");
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let queued = self.publish.lock().pop_front();
        queued.unwrap_or_else(|| {
            let results: BTreeMap<String, TargetOutcome> = request
                .targets()
                .iter()
                .map(|id| (id.clone(), TargetOutcome::new(true, "Published")))
                .collect();
            Ok(PublishOutcome::from_results(results, None))
        })
    }

    async fn posts_performance(&self) -> PagecastResult<PostsReport> {
        self.record("posts_performance");
        let queued = self.posts.lock().pop_front();
        queued.unwrap_or_else(|| Ok(PostsReport::new(Vec::new())))
    }

    async fn post_details(&self, post_id: &str) -> PagecastResult<PostDetails> {
        self.record("post_details");
        let queued = self.post_details.lock().pop_front();
        queued.unwrap_or_else(|| Ok(PostDetails::new(post_id, "Live post")))
    }

    async fn boost(&self, request: &BoostRequest) -> PagecastResult<BoostReceipt> {
        self.record("boost");
        self.boosts.lock().push(request.clone());
        let queued = self.boost.lock().pop_front();
        queued.unwrap_or(Ok(BoostReceipt {
            estimated_reach: 2500,
        }))
    }

    async fn submit_campaign(&self, draft: &CampaignDraft) -> PagecastResult<CampaignReceipt> {
        self.record("submit_campaign");
        self.drafts.lock().push(draft.clone());
        let queued = self.campaign.lock().pop_front();
        queued.unwrap_or_else(|| {
            Ok(CampaignReceipt {
                campaign_id: Some("cmp_1".to_string()),
            })
        })
    }

    async fn list_campaigns(&self) -> PagecastResult<Vec<CampaignRecord>> {
        self.record("list_campaigns");
        Ok(Vec::new())
    }

    async fn toggle_campaign(
        &self,
        _campaign_id: &str,
        status: CampaignStatus,
    ) -> PagecastResult<CampaignStatus> {
        self.record("toggle_campaign");
        Ok(status)
    }

    async fn delete_campaign(&self, _campaign_id: &str) -> PagecastResult<()> {
        self.record("delete_campaign");
        Ok(())
    }

    async fn list_audiences(&self) -> PagecastResult<Vec<Audience>> {
        self.record("list_audiences");
        Ok(Vec::new())
    }

    async fn create_audience(&self, draft: &AudienceDraft) -> PagecastResult<Audience> {
        self.record("create_audience");
        Ok(Audience::new("aud_new", draft.name().clone(), *draft.kind()))
    }

    async fn update_audience(
        &self,
        audience_id: &str,
        draft: &AudienceDraft,
    ) -> PagecastResult<Audience> {
        self.record("update_audience");
        Ok(Audience::new(audience_id, draft.name().clone(), *draft.kind()))
    }

    async fn delete_audience(&self, _audience_id: &str) -> PagecastResult<()> {
        self.record("delete_audience");
        Ok(())
    }

    async fn duplicate_audience(&self, audience_id: &str) -> PagecastResult<Audience> {
        self.record("duplicate_audience");
        Ok(Audience::new(
            format!("{audience_id}_copy"),
            "Copy",
            AudienceKind::Custom,
        ))
    }

    async fn estimate_audience(
        &self,
        _request: &AudienceEstimateRequest,
    ) -> PagecastResult<AudienceEstimate> {
        self.record("estimate_audience");
        not_mocked("estimate audience")
    }

    async fn search_interests(&self, query: &InterestQuery) -> PagecastResult<Vec<Interest>> {
        self.record("search_interests");
        Ok(vec![Interest::new(query.as_str(), query.as_str(), "Hobbies")])
    }

    async fn settings(&self) -> PagecastResult<Settings> {
        self.record("settings");
        not_mocked("settings")
    }

    async fn save_settings(&self, _update: &SettingsUpdate) -> PagecastResult<()> {
        self.record("save_settings");
        Ok(())
    }

    async fn test_connection(&self) -> PagecastResult<ConnectionCheck> {
        self.record("test_connection");
        Ok(ConnectionCheck {
            success: true,
            message: "Connection OK".to_string(),
        })
    }

    async fn dashboard(&self) -> PagecastResult<DashboardOverview> {
        self.record("dashboard");
        Ok(DashboardOverview::default())
    }

    async fn scheduled_posts(&self) -> PagecastResult<Vec<ScheduledPost>> {
        self.record("scheduled_posts");
        Ok(Vec::new())
    }
}
