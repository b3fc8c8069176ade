//! Promotion of one existing post.

use crate::{ConsoleEvent, EventBus, NoticeLevel, SubmissionToken, token::TokenSequence};
use derive_getters::Getters;
use pagecast_cache::SharedPostCache;
use pagecast_core::{
    AudienceMode, BoostReceipt, BoostRequest, BudgetSummary, CustomTargeting, Objective,
};
use pagecast_error::{
    PagecastResult, ValidationError, ValidationErrorKind, WorkflowError, WorkflowErrorKind,
};
use pagecast_interface::{ConsoleApi, PostDetails};
use tracing::{debug, instrument, warn};

/// Lifecycle of the boost dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BoostState {
    /// Dialog hidden
    Closed,
    /// Post shown, form untouched
    PreviewLoaded,
    /// Form edited at least once
    FormEditing,
    /// Waiting for the service
    Submitting,
}

/// Where the preview of the boosted post came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PreviewSource {
    /// Fetched from the service
    Live,
    /// Rebuilt from the last post listing
    Cached,
    /// Nothing known about the post
    Unavailable,
}

/// Post being boosted.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct BoostPreview {
    post_id: String,
    details: Option<PostDetails>,
    source: PreviewSource,
}

/// Boost parameters as edited in the dialog.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct BoostForm {
    objective: Objective,
    daily_budget: f64,
    duration_days: u32,
    audience_mode: AudienceMode,
    targeting: Option<CustomTargeting>,
    saved_audience_id: Option<String>,
}

impl Default for BoostForm {
    fn default() -> Self {
        Self::new(Objective::Reach, 20.0, 7)
    }
}

impl BoostForm {
    /// Smallest accepted daily budget.
    pub const MIN_DAILY_BUDGET: f64 = 5.0;

    /// Form with automatic targeting.
    pub fn new(objective: Objective, daily_budget: f64, duration_days: u32) -> Self {
        Self {
            objective,
            daily_budget,
            duration_days,
            audience_mode: AudienceMode::Auto,
            targeting: None,
            saved_audience_id: None,
        }
    }

    /// Check the form and report the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let problem = if self.daily_budget.is_nan() || self.daily_budget < Self::MIN_DAILY_BUDGET {
            Some("daily budget must be at least 5")
        } else if self.duration_days < 1 {
            Some("duration must be at least 1 day")
        } else if self.audience_mode == AudienceMode::Saved
            && self
                .saved_audience_id
                .as_deref()
                .is_none_or(|id| id.trim().is_empty())
        {
            Some("select a saved audience")
        } else {
            None
        };

        match problem {
            Some(reason) => Err(ValidationError::new(
                ValidationErrorKind::IncompleteBoostForm(reason.to_string()),
            )),
            None => Ok(()),
        }
    }

    fn to_request(&self, post_id: &str) -> BoostRequest {
        BoostRequest::new(
            post_id,
            self.objective,
            self.daily_budget,
            self.duration_days,
            self.audience_mode,
            self.targeting.clone(),
            self.saved_audience_id.clone(),
        )
    }

    fn switch_mode(&mut self, mode: AudienceMode) {
        if self.audience_mode == mode {
            return;
        }
        self.audience_mode = mode;
        self.targeting = match mode {
            AudienceMode::Custom => Some(CustomTargeting::default()),
            AudienceMode::Auto | AudienceMode::Saved => None,
        };
        self.saved_audience_id = None;
    }
}

/// A boost that has been handed out for sending.
#[derive(Debug, Clone, Getters)]
pub struct PendingBoost {
    token: SubmissionToken,
    request: BoostRequest,
}

/// Modal flow collecting budget and targeting for one post.
///
/// ```text
/// Closed -> PreviewLoaded -> FormEditing -> Submitting -> Closed
///                                 ^             |
///                                 +-- failure --+
/// ```
#[derive(Debug)]
pub struct BoostWorkflow {
    state: BoostState,
    preview: Option<BoostPreview>,
    form: BoostForm,
    defaults: BoostForm,
    cache: SharedPostCache,
    tokens: TokenSequence,
    in_flight: Option<SubmissionToken>,
    events: EventBus,
}

impl BoostWorkflow {
    /// Closed workflow using `cache` for offline previews.
    pub fn new(cache: SharedPostCache, events: EventBus) -> Self {
        Self {
            state: BoostState::Closed,
            preview: None,
            form: BoostForm::default(),
            defaults: BoostForm::default(),
            cache,
            tokens: TokenSequence::default(),
            in_flight: None,
            events,
        }
    }

    /// Replace the values the form is reset to on open.
    pub fn with_defaults(mut self, defaults: BoostForm) -> Self {
        self.form = defaults.clone();
        self.defaults = defaults;
        self
    }

    /// Current state.
    pub fn state(&self) -> BoostState {
        self.state
    }

    /// Post being boosted, while open.
    pub fn preview(&self) -> Option<&BoostPreview> {
        self.preview.as_ref()
    }

    /// Current form values.
    pub fn form(&self) -> &BoostForm {
        &self.form
    }

    /// Total spend and reach range for the current form.
    pub fn budget_summary(&self) -> BudgetSummary {
        BudgetSummary::new(self.form.daily_budget, self.form.duration_days)
    }

    /// Open the dialog for `post_id`, fetching its details.
    #[instrument(skip(self, api))]
    pub async fn open(&mut self, post_id: &str, api: &dyn ConsoleApi) -> PagecastResult<&BoostPreview> {
        self.ensure_not_submitting("open")?;
        let fetched = api.post_details(post_id).await;
        self.load_preview(post_id, fetched)
    }

    /// Open the dialog with an already fetched details result.
    ///
    /// A failed fetch falls back to the cached post summary. When nothing is
    /// cached the dialog still opens with an empty preview.
    pub fn load_preview(
        &mut self,
        post_id: &str,
        fetched: PagecastResult<PostDetails>,
    ) -> PagecastResult<&BoostPreview> {
        self.ensure_not_submitting("open")?;

        let (details, source) = match fetched {
            Ok(details) => (Some(details), PreviewSource::Live),
            Err(err) => {
                warn!(error = %err, post_id, "Post details fetch failed");
                match self.cache.lookup(post_id) {
                    Some(post) => (Some(PostDetails::from_summary(&post)), PreviewSource::Cached),
                    None => {
                        self.events
                            .notify(NoticeLevel::Info, "Post details unavailable");
                        (None, PreviewSource::Unavailable)
                    }
                }
            }
        };

        debug!(post_id, %source, "Boost dialog opened");
        self.form = self.defaults.clone();
        self.state = BoostState::PreviewLoaded;
        self.in_flight = None;
        Ok(&*self.preview.insert(BoostPreview {
            post_id: post_id.to_string(),
            details,
            source,
        }))
    }

    /// Change the objective.
    pub fn set_objective(&mut self, objective: Objective) -> PagecastResult<()> {
        self.editable("set objective")?.objective = objective;
        Ok(())
    }

    /// Change the daily budget.
    pub fn set_daily_budget(&mut self, daily_budget: f64) -> PagecastResult<()> {
        self.editable("set budget")?.daily_budget = daily_budget;
        Ok(())
    }

    /// Change the duration.
    pub fn set_duration_days(&mut self, days: u32) -> PagecastResult<()> {
        self.editable("set duration")?.duration_days = days;
        Ok(())
    }

    /// Switch audience mode, clearing data that belonged to the previous mode.
    pub fn set_audience_mode(&mut self, mode: AudienceMode) -> PagecastResult<()> {
        self.editable("set audience mode")?.switch_mode(mode);
        Ok(())
    }

    /// Use custom targeting.
    pub fn set_targeting(&mut self, targeting: CustomTargeting) -> PagecastResult<()> {
        let form = self.editable("set targeting")?;
        form.switch_mode(AudienceMode::Custom);
        form.targeting = Some(targeting);
        Ok(())
    }

    /// Use a saved audience.
    pub fn set_saved_audience(&mut self, audience_id: impl Into<String>) -> PagecastResult<()> {
        let form = self.editable("set saved audience")?;
        form.switch_mode(AudienceMode::Saved);
        form.saved_audience_id = Some(audience_id.into());
        Ok(())
    }

    /// Validate the form and mark the boost as in flight.
    ///
    /// On validation failure the workflow stays in `FormEditing`.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn begin_submit(&mut self) -> PagecastResult<PendingBoost> {
        let post_id = match (&self.state, &self.preview) {
            (BoostState::Closed, _) | (_, None) => {
                return Err(WorkflowError::new(WorkflowErrorKind::NotOpen).into());
            }
            (BoostState::Submitting, _) => {
                return Err(WorkflowError::new(WorkflowErrorKind::AlreadySubmitting).into());
            }
            (_, Some(preview)) => preview.post_id.clone(),
        };

        if let Err(err) = self.form.validate() {
            self.state = BoostState::FormEditing;
            self.events.notify(NoticeLevel::Error, err.kind().to_string());
            return Err(err.into());
        }

        let token = self.tokens.issue();
        self.in_flight = Some(token);
        self.state = BoostState::Submitting;
        debug!(%token, post_id, "Boost submitted");
        Ok(PendingBoost {
            token,
            request: self.form.to_request(&post_id),
        })
    }

    /// Apply the service's answer to the boost identified by `token`.
    ///
    /// Returns `Ok(None)` when the dialog was closed or reopened since; the
    /// response is then ignored.
    #[instrument(skip(self, result), fields(%token))]
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        result: PagecastResult<BoostReceipt>,
    ) -> PagecastResult<Option<BoostReceipt>> {
        if self.state != BoostState::Submitting || self.in_flight != Some(token) {
            debug!("Discarding stale boost response");
            return Ok(None);
        }
        self.in_flight = None;

        match result {
            Ok(receipt) => {
                self.state = BoostState::Closed;
                self.preview = None;
                self.form = self.defaults.clone();
                self.events.notify(
                    NoticeLevel::Success,
                    format!(
                        "Boost created, estimated reach {}",
                        receipt.estimated_reach
                    ),
                );
                self.events.emit(ConsoleEvent::PostsRefreshRequested);
                Ok(Some(receipt))
            }
            Err(err) => {
                warn!(error = %err, "Boost failed");
                self.state = BoostState::FormEditing;
                self.events.notify(NoticeLevel::Error, err.notice_text());
                Err(err)
            }
        }
    }

    /// Validate, send and interpret the boost.
    pub async fn submit(&mut self, api: &dyn ConsoleApi) -> PagecastResult<BoostReceipt> {
        let pending = self.begin_submit()?;
        let result = api.boost(&pending.request).await;
        self.complete(pending.token, result)?
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::StaleResponse).into())
    }

    /// Hide the dialog from any state. An in-flight boost is not cancelled
    /// but its response will be ignored.
    pub fn close(&mut self) {
        if self.state == BoostState::Submitting {
            debug!("Closing boost dialog with a submission in flight");
        }
        self.state = BoostState::Closed;
        self.preview = None;
        self.in_flight = None;
    }

    fn ensure_not_submitting(&self, action: &str) -> PagecastResult<()> {
        if self.state == BoostState::Submitting {
            return Err(WorkflowError::invalid(self.state, action).into());
        }
        Ok(())
    }

    fn editable(&mut self, action: &str) -> PagecastResult<&mut BoostForm> {
        match self.state {
            BoostState::Closed => Err(WorkflowError::new(WorkflowErrorKind::NotOpen).into()),
            BoostState::Submitting => Err(WorkflowError::invalid(self.state, action).into()),
            BoostState::PreviewLoaded | BoostState::FormEditing => {
                self.state = BoostState::FormEditing;
                Ok(&mut self.form)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecast_error::ConnectionError;

    fn opened() -> BoostWorkflow {
        let mut workflow = BoostWorkflow::new(SharedPostCache::default(), EventBus::default());
        workflow
            .load_preview("post_1", Ok(PostDetails::new("post_1", "Hello")))
            .unwrap();
        workflow
    }

    #[test]
    fn open_resets_form_to_defaults() {
        let mut workflow = opened();
        workflow.set_daily_budget(99.0).unwrap();
        workflow.close();
        workflow
            .load_preview("post_2", Ok(PostDetails::new("post_2", "x")))
            .unwrap();
        assert_eq!(*workflow.form(), BoostForm::default());
        assert_eq!(workflow.state(), BoostState::PreviewLoaded);
    }

    #[test]
    fn edits_move_to_form_editing() {
        let mut workflow = opened();
        workflow.set_objective(Objective::Traffic).unwrap();
        assert_eq!(workflow.state(), BoostState::FormEditing);
    }

    #[test]
    fn edits_require_an_open_dialog() {
        let mut workflow = BoostWorkflow::new(SharedPostCache::default(), EventBus::default());
        assert!(workflow.set_daily_budget(10.0).is_err());
    }

    #[test]
    fn switching_mode_clears_other_targeting() {
        let mut workflow = opened();
        workflow.set_saved_audience("aud_1").unwrap();
        workflow.set_audience_mode(AudienceMode::Custom).unwrap();
        assert!(workflow.form().saved_audience_id().is_none());
        assert!(workflow.form().targeting().is_some());

        workflow.set_audience_mode(AudienceMode::Auto).unwrap();
        assert!(workflow.form().targeting().is_none());
    }

    #[test]
    fn low_budget_is_incomplete() {
        let mut workflow = opened();
        workflow.set_daily_budget(4.99).unwrap();
        let err = workflow.begin_submit().unwrap_err();
        assert!(err.as_validation().is_some());
        assert_eq!(workflow.state(), BoostState::FormEditing);
    }

    #[test]
    fn unavailable_preview_still_opens() {
        let mut workflow = BoostWorkflow::new(SharedPostCache::default(), EventBus::default());
        let preview = workflow
            .load_preview("post_9", Err(ConnectionError::new("down").into()))
            .unwrap();
        assert_eq!(*preview.source(), PreviewSource::Unavailable);
        assert!(preview.details().is_none());
        assert_eq!(workflow.state(), BoostState::PreviewLoaded);
    }

    #[test]
    fn budget_summary_tracks_form() {
        let mut workflow = opened();
        workflow.set_daily_budget(10.0).unwrap();
        workflow.set_duration_days(3).unwrap();
        assert_eq!(workflow.budget_summary().total(), 30.0);
    }
}
