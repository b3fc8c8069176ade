//! Validated one-shot actions on campaigns, audiences and settings.

use crate::{ConsoleEvent, EventBus, NoticeLevel};
use pagecast_core::{Audience, AudienceDraft, CampaignStatus, SettingsUpdate};
use pagecast_error::PagecastResult;
use pagecast_interface::{ConnectionCheck, ConsoleApi};
use tracing::instrument;

/// Runs management actions and reports their result on the event bus.
///
/// Inputs are validated before anything is sent. Every failure is also
/// published as an error notice.
#[derive(Debug, Clone, Default)]
pub struct ConsoleActions {
    events: EventBus,
}

impl ConsoleActions {
    /// Actions reporting to `events`.
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }

    /// Flip a campaign between active and paused given its current status.
    #[instrument(skip(self, api))]
    pub async fn toggle_campaign(
        &self,
        api: &dyn ConsoleApi,
        campaign_id: &str,
        current: CampaignStatus,
    ) -> PagecastResult<CampaignStatus> {
        let status = self.report(api.toggle_campaign(campaign_id, current.toggled()).await)?;
        self.events
            .notify(NoticeLevel::Success, format!("Campaign is now {}", status));
        self.events.emit(ConsoleEvent::CampaignsRefreshRequested);
        Ok(status)
    }

    /// Delete a campaign.
    #[instrument(skip(self, api))]
    pub async fn delete_campaign(&self, api: &dyn ConsoleApi, campaign_id: &str) -> PagecastResult<()> {
        self.report(api.delete_campaign(campaign_id).await)?;
        self.events.notify(NoticeLevel::Success, "Campaign deleted");
        self.events.emit(ConsoleEvent::CampaignsRefreshRequested);
        Ok(())
    }

    /// Create an audience, or replace `audience_id` when given.
    #[instrument(skip(self, api, draft))]
    pub async fn save_audience(
        &self,
        api: &dyn ConsoleApi,
        audience_id: Option<&str>,
        draft: &AudienceDraft,
    ) -> PagecastResult<Audience> {
        self.report(draft.validate().map_err(Into::into))?;
        let saved = match audience_id {
            Some(id) => api.update_audience(id, draft).await,
            None => api.create_audience(draft).await,
        };
        let audience = self.report(saved)?;
        self.events
            .notify(NoticeLevel::Success, format!("Audience '{}' saved", audience.name()));
        Ok(audience)
    }

    /// Delete an audience.
    #[instrument(skip(self, api))]
    pub async fn delete_audience(&self, api: &dyn ConsoleApi, audience_id: &str) -> PagecastResult<()> {
        self.report(api.delete_audience(audience_id).await)?;
        self.events.notify(NoticeLevel::Success, "Audience deleted");
        Ok(())
    }

    /// Copy an audience.
    #[instrument(skip(self, api))]
    pub async fn duplicate_audience(
        &self,
        api: &dyn ConsoleApi,
        audience_id: &str,
    ) -> PagecastResult<Audience> {
        let copy = self.report(api.duplicate_audience(audience_id).await)?;
        self.events
            .notify(NoticeLevel::Success, format!("Audience '{}' created", copy.name()));
        Ok(copy)
    }

    /// Store API credentials.
    #[instrument(skip_all)]
    pub async fn save_settings(&self, api: &dyn ConsoleApi, update: &SettingsUpdate) -> PagecastResult<()> {
        self.report(update.validate().map_err(Into::into))?;
        self.report(api.save_settings(update).await)?;
        self.events.notify(NoticeLevel::Success, "Settings saved");
        Ok(())
    }

    /// Ask the service to try its stored credentials.
    #[instrument(skip_all)]
    pub async fn test_connection(&self, api: &dyn ConsoleApi) -> PagecastResult<ConnectionCheck> {
        let check = self.report(api.test_connection().await)?;
        let level = if check.success {
            NoticeLevel::Success
        } else {
            NoticeLevel::Error
        };
        self.events.notify(level, check.message.clone());
        Ok(check)
    }

    fn report<T>(&self, result: PagecastResult<T>) -> PagecastResult<T> {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Console action failed");
            self.events.notify(NoticeLevel::Error, err.notice_text());
        }
        result
    }
}
