use crate::ApiConfig;
use async_trait::async_trait;
use pagecast_core::{
    Audience, AudienceDraft, AudienceEstimate, AudienceEstimateRequest, BoostReceipt,
    BoostRequest, CampaignDraft, CampaignReceipt, CampaignRecord, CampaignStatus,
    DashboardOverview, Interest, InterestQuery, PostsReport, PublishOutcome, PublishRequest,
    ScheduledPost, Settings, SettingsUpdate, Target,
};
use pagecast_error::{
    AuthError, ConnectionError, JsonError, PagecastError, PagecastErrorKind, PagecastResult,
    SubmissionError, ValidationError, ValidationErrorKind,
};
use pagecast_interface::{
    AudienceEstimatePayload, AudiencePayload, AudiencesPayload, CampaignsPayload,
    ConnectionCheck, ConsoleApi, DashboardPayload, Envelope, InterestsPayload, LoginRedirect,
    MessagePayload, NoRedirect, PostDetails, PostDetailsPayload, PublishPayload,
    ScheduledPostsPayload, TargetsPayload, TogglePayload, TokenStore,
};
use reqwest::{Method, RequestBuilder, multipart};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

/// [`ConsoleApi`] over the publishing service's REST routes.
///
/// Every request carries the stored bearer token when there is one. A 401
/// answer discards the token, fires the login redirect hook and surfaces as
/// an `AuthError`.
#[derive(Clone)]
pub struct HttpConsoleApi {
    api: ApiConfig,
    client: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
    redirect: Arc<dyn LoginRedirect>,
}

impl std::fmt::Debug for HttpConsoleApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConsoleApi")
            .field("base_url", self.api.base_url())
            .field("timeout_secs", self.api.timeout_secs())
            .field("signed_in", &self.tokens.token().is_some())
            .finish()
    }
}

impl HttpConsoleApi {
    /// Create a client for the service described by `api`.
    ///
    /// # Errors
    ///
    /// Returns a `ConnectionError` if the HTTP client cannot be built.
    #[instrument(skip(api, tokens), fields(base_url = %api.base_url()))]
    pub fn new(api: ApiConfig, tokens: Arc<dyn TokenStore>) -> PagecastResult<Self> {
        tracing::debug!("Creating console client");
        let client = reqwest::Client::builder()
            .timeout(api.timeout())
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                ConnectionError::new(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self {
            api,
            client,
            tokens,
            redirect: Arc::new(NoRedirect),
        })
    }

    /// Install the hook fired when the service rejects the session.
    pub fn with_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
        self.redirect = redirect;
        self
    }

    /// The service configuration
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    fn request(&self, method: Method, route: &str) -> RequestBuilder {
        let url = self.api.url(route);
        tracing::debug!(%method, %url, "Preparing request");
        let req = self.client.request(method, url);
        match self.tokens.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send `req` and decode the enveloped body without judging `success`.
    async fn exchange<T>(&self, operation: &str, req: RequestBuilder) -> PagecastResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = req.send().await.map_err(|e| {
            tracing::error!(operation, "Request failed: {}", e);
            ConnectionError::new(format!("{} request failed: {}", operation, e))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(operation, "Session rejected, signing out");
            self.tokens.clear();
            self.redirect.redirect(self.api.login_url());
            return Err(AuthError::new(format!("{} rejected the session", operation)).into());
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(operation, "Failed to read response body: {}", e);
            ConnectionError::new(format!("Failed to read {} response: {}", operation, e))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<MessagePayload>>(&body)
                .ok()
                .and_then(|env| env.error)
                .unwrap_or_else(|| format!("Service returned {}", status));
            tracing::error!(operation, status = status.as_u16(), %message, "Service rejected request");
            return Err(SubmissionError::new(operation, message)
                .with_status(status.as_u16())
                .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(operation, "Failed to parse response: {}", e);
            PagecastError::from(JsonError::response(operation, e))
        })
    }

    /// Send `req` and unwrap the body, turning `success: false` into a `SubmissionError`.
    async fn call<T>(&self, operation: &str, req: RequestBuilder) -> PagecastResult<T>
    where
        T: DeserializeOwned,
    {
        let envelope = self.exchange::<T>(operation, req).await?;
        let body = envelope.into_result(operation).inspect_err(|e| {
            tracing::warn!(operation, message = %e.message(), "Service reported failure");
        })?;
        tracing::debug!(operation, "Request successful");
        Ok(body)
    }

    fn publish_form(request: &PublishRequest) -> PagecastResult<multipart::Form> {
        let page_ids = serde_json::to_string(request.targets())
            .map_err(|e| JsonError::new(format!("Failed to encode page ids: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("message", request.message().clone())
            .text("page_ids", page_ids);
        if let Some(link) = request.link() {
            form = form.text("link", link.clone());
        }
        for asset in request.media() {
            let part = multipart::Part::bytes(asset.bytes().clone())
                .file_name(asset.file_name().clone())
                .mime_str(asset.content_type())
                .map_err(|e| {
                    ValidationError::new(ValidationErrorKind::InvalidField {
                        field: "media".to_string(),
                        reason: format!("{}: {}", asset.file_name(), e),
                    })
                })?;
            form = form.part("media", part);
        }
        Ok(form)
    }

    fn missing(operation: &str, what: &str) -> PagecastError {
        SubmissionError::new(operation, format!("Response did not include the {}", what)).into()
    }
}

#[async_trait]
impl ConsoleApi for HttpConsoleApi {
    #[instrument(skip(self))]
    async fn list_targets(&self) -> PagecastResult<Vec<Target>> {
        let req = self.request(Method::GET, "/facebook/pages");
        let body: TargetsPayload = self.call("list pages", req).await?;
        Ok(body.pages)
    }

    #[instrument(skip(self))]
    async fn sync_targets(&self) -> PagecastResult<Vec<Target>> {
        let req = self.request(Method::POST, "/facebook/pages/sync");
        let body: TargetsPayload = self.call("sync pages", req).await?;
        if let Some(message) = &body.message {
            tracing::info!(%message, "Pages synchronized");
        }
        Ok(body.pages)
    }

    #[instrument(
        skip(self, request),
        fields(targets = request.targets().len(), media = request.media().len())
    )]
    async fn publish(&self, request: &PublishRequest) -> PagecastResult<PublishOutcome> {
        let form = Self::publish_form(request)?;
        let req = self
            .request(Method::POST, "/facebook/publish/multi")
            .multipart(form);
        let body: PublishPayload = self.call("publish", req).await?;
        Ok(PublishOutcome::from_results(body.results, body.summary))
    }

    #[instrument(skip(self))]
    async fn posts_performance(&self) -> PagecastResult<PostsReport> {
        let req = self.request(Method::GET, "/facebook/posts/performance");
        self.call("posts performance", req).await
    }

    #[instrument(skip(self))]
    async fn post_details(&self, post_id: &str) -> PagecastResult<PostDetails> {
        let route = format!("/facebook/posts/{}/details", post_id);
        let req = self.request(Method::GET, &route);
        let body: PostDetailsPayload = self.call("post details", req).await?;
        body.post.ok_or_else(|| Self::missing("post details", "post"))
    }

    #[instrument(skip(self, request), fields(post_id = %request.post_id()))]
    async fn boost(&self, request: &BoostRequest) -> PagecastResult<BoostReceipt> {
        let route = format!("/facebook/posts/{}/boost", request.post_id());
        let req = self.request(Method::POST, &route).json(request);
        self.call("boost", req).await
    }

    #[instrument(skip(self, draft))]
    async fn submit_campaign(&self, draft: &CampaignDraft) -> PagecastResult<CampaignReceipt> {
        let req = self
            .request(Method::POST, "/facebook/campaigns/create")
            .json(draft);
        self.call("create campaign", req).await
    }

    #[instrument(skip(self))]
    async fn list_campaigns(&self) -> PagecastResult<Vec<CampaignRecord>> {
        let req = self.request(Method::GET, "/facebook/campaigns");
        let body: CampaignsPayload = self.call("list campaigns", req).await?;
        Ok(body.campaigns)
    }

    #[instrument(skip(self))]
    async fn toggle_campaign(
        &self,
        campaign_id: &str,
        status: CampaignStatus,
    ) -> PagecastResult<CampaignStatus> {
        let route = format!("/facebook/campaigns/{}/toggle", campaign_id);
        let req = self
            .request(Method::POST, &route)
            .json(&serde_json::json!({ "status": status }));
        let body: TogglePayload = self.call("toggle campaign", req).await?;
        Ok(body.new_status.unwrap_or(status))
    }

    #[instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: &str) -> PagecastResult<()> {
        let route = format!("/facebook/campaigns/{}", campaign_id);
        let req = self.request(Method::DELETE, &route);
        let _: MessagePayload = self.call("delete campaign", req).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_audiences(&self) -> PagecastResult<Vec<Audience>> {
        let req = self.request(Method::GET, "/facebook/audiences");
        let body: AudiencesPayload = self.call("list audiences", req).await?;
        Ok(body.audiences)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name()))]
    async fn create_audience(&self, draft: &AudienceDraft) -> PagecastResult<Audience> {
        let req = self.request(Method::POST, "/facebook/audiences").json(draft);
        let body: AudiencePayload = self.call("create audience", req).await?;
        body.audience
            .ok_or_else(|| Self::missing("create audience", "audience"))
    }

    #[instrument(skip(self, draft))]
    async fn update_audience(
        &self,
        audience_id: &str,
        draft: &AudienceDraft,
    ) -> PagecastResult<Audience> {
        let route = format!("/facebook/audiences/{}", audience_id);
        let req = self.request(Method::PUT, &route).json(draft);
        let body: AudiencePayload = self.call("update audience", req).await?;
        body.audience
            .ok_or_else(|| Self::missing("update audience", "audience"))
    }

    #[instrument(skip(self))]
    async fn delete_audience(&self, audience_id: &str) -> PagecastResult<()> {
        let route = format!("/facebook/audiences/{}", audience_id);
        let req = self.request(Method::DELETE, &route);
        let _: MessagePayload = self.call("delete audience", req).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn duplicate_audience(&self, audience_id: &str) -> PagecastResult<Audience> {
        let route = format!("/facebook/audiences/{}/duplicate", audience_id);
        let req = self.request(Method::POST, &route);
        let body: AudiencePayload = self.call("duplicate audience", req).await?;
        body.audience
            .ok_or_else(|| Self::missing("duplicate audience", "audience"))
    }

    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    async fn estimate_audience(
        &self,
        request: &AudienceEstimateRequest,
    ) -> PagecastResult<AudienceEstimate> {
        request.validate()?;
        let req = self
            .request(Method::POST, "/facebook/audiences/estimate")
            .json(request);
        let body: AudienceEstimatePayload = self.call("estimate audience", req).await?;
        body.estimate
            .ok_or_else(|| Self::missing("estimate audience", "estimate"))
    }

    #[instrument(skip(self), fields(query = %query.as_str()))]
    async fn search_interests(&self, query: &InterestQuery) -> PagecastResult<Vec<Interest>> {
        let req = self
            .request(Method::GET, "/facebook/audiences/interests/search")
            .query(&[("q", query.as_str())]);
        let body: InterestsPayload = self.call("search interests", req).await?;
        tracing::debug!(matches = body.interests.len(), "Interest search answered");
        Ok(body.interests)
    }

    #[instrument(skip(self))]
    async fn settings(&self) -> PagecastResult<Settings> {
        let req = self.request(Method::GET, "/settings");
        self.call("load settings", req).await
    }

    #[instrument(skip(self, update), fields(app_id = %update.app_id()))]
    async fn save_settings(&self, update: &SettingsUpdate) -> PagecastResult<()> {
        let req = self.request(Method::POST, "/settings").json(update);
        let body: MessagePayload = self.call("save settings", req).await?;
        tracing::info!(message = %body.message, "Settings saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn test_connection(&self) -> PagecastResult<ConnectionCheck> {
        let operation = "test connection";
        let req = self.request(Method::POST, "/facebook/test-connection");
        let envelope = match self.exchange::<MessagePayload>(operation, req).await {
            Ok(envelope) => envelope,
            Err(e) => {
                return match e.kind() {
                    PagecastErrorKind::Submission(rejected) => Ok(ConnectionCheck {
                        success: false,
                        message: rejected.message().clone(),
                    }),
                    _ => Err(e),
                };
            }
        };
        Ok(match envelope.into_result(operation) {
            Ok(body) => ConnectionCheck {
                success: true,
                message: body.message,
            },
            Err(rejected) => ConnectionCheck {
                success: false,
                message: rejected.message().clone(),
            },
        })
    }

    #[instrument(skip(self))]
    async fn dashboard(&self) -> PagecastResult<DashboardOverview> {
        let req = self.request(Method::GET, "/dashboard/overview");
        let body: DashboardPayload = self.call("dashboard", req).await?;
        Ok(body.data)
    }

    #[instrument(skip(self))]
    async fn scheduled_posts(&self) -> PagecastResult<Vec<ScheduledPost>> {
        let req = self.request(Method::GET, "/dashboard/scheduled-posts");
        let body: ScheduledPostsPayload = self.call("scheduled posts", req).await?;
        Ok(body.scheduled_posts)
    }
}
