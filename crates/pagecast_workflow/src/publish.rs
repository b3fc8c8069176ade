//! One publish action fanned out to several pages by the service.

use crate::{
    EventBus, MediaStagingArea, NoticeLevel, ProgressConfig, PublishRequestBuilder,
    SimulatedProgress, SubmissionToken, TargetSelectionSet, token::TokenSequence,
};
use derive_getters::Getters;
use pagecast_core::{PublishOutcome, PublishRequest};
use pagecast_error::{
    FailedTarget, PagecastError, PagecastErrorKind, PagecastResult, PartialOutcomeError, WorkflowError,
    WorkflowErrorKind,
};
use pagecast_interface::ConsoleApi;
use tracing::{debug, error, instrument, warn};

/// Whether a publish is in flight.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PublishState {
    /// Form editable, nothing in flight
    #[display("idle")]
    Idle,
    /// Waiting for the service
    #[display("submitting {}", token)]
    Submitting {
        /// Identity of the in-flight submission
        token: SubmissionToken,
        /// Pages the request was sent to
        targets: Vec<String>,
    },
}

/// A request that has been handed out for sending.
#[derive(Debug, Clone, Getters)]
pub struct PendingPublish {
    token: SubmissionToken,
    request: PublishRequest,
}

/// Owns the publish form, page selection and staged media, and interprets
/// the aggregate outcome of a publish.
///
/// A complete success clears the form, the selection and the staging area.
/// Any failure leaves all three untouched so the user can retry.
#[derive(Debug)]
pub struct PublishCoordinator {
    form: PublishRequestBuilder,
    selection: TargetSelectionSet,
    staging: MediaStagingArea,
    state: PublishState,
    tokens: TokenSequence,
    progress: SimulatedProgress,
    progress_config: ProgressConfig,
    last_outcome: Option<PublishOutcome>,
    events: EventBus,
}

impl PublishCoordinator {
    /// Coordinator reporting to `events`.
    pub fn new(events: EventBus) -> Self {
        Self::with_progress(events, ProgressConfig::default())
    }

    /// Coordinator with a custom progress tick and cap.
    pub fn with_progress(events: EventBus, progress_config: ProgressConfig) -> Self {
        Self {
            form: PublishRequestBuilder::default(),
            selection: TargetSelectionSet::new().with_events(events.clone()),
            staging: MediaStagingArea::default(),
            state: PublishState::Idle,
            tokens: TokenSequence::default(),
            progress: SimulatedProgress::new(progress_config.cap),
            progress_config,
            last_outcome: None,
            events,
        }
    }

    /// Message and link fields.
    pub fn form(&self) -> &PublishRequestBuilder {
        &self.form
    }

    /// Editable message and link fields.
    pub fn form_mut(&mut self) -> &mut PublishRequestBuilder {
        &mut self.form
    }

    /// Selected pages.
    pub fn selection(&self) -> &TargetSelectionSet {
        &self.selection
    }

    /// Editable page selection.
    pub fn selection_mut(&mut self) -> &mut TargetSelectionSet {
        &mut self.selection
    }

    /// Staged media.
    pub fn staging(&self) -> &MediaStagingArea {
        &self.staging
    }

    /// Editable staged media.
    pub fn staging_mut(&mut self) -> &mut MediaStagingArea {
        &mut self.staging
    }

    /// Current state.
    pub fn state(&self) -> &PublishState {
        &self.state
    }

    /// Whether a publish is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, PublishState::Submitting { .. })
    }

    /// Cosmetic progress of the current or last publish.
    pub fn progress(&self) -> &SimulatedProgress {
        &self.progress
    }

    /// Per-page results of the last completed publish.
    ///
    /// Cleared when a new submission starts, so a rejected or failed
    /// submission leaves nothing here.
    pub fn last_outcome(&self) -> Option<&PublishOutcome> {
        self.last_outcome.as_ref()
    }

    /// Validate the form and mark a submission as in flight.
    ///
    /// Validation failures leave the state unchanged.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn begin_submit(&mut self) -> PagecastResult<PendingPublish> {
        if self.is_submitting() {
            return Err(WorkflowError::new(WorkflowErrorKind::AlreadySubmitting).into());
        }

        let request = match self.form.build(&self.selection, &self.staging) {
            Ok(request) => request,
            Err(err) => {
                self.events.notify(NoticeLevel::Error, err.kind().to_string());
                return Err(err.into());
            }
        };

        let token = self.tokens.issue();
        self.last_outcome = None;
        self.progress.reset();
        self.state = PublishState::Submitting {
            token,
            targets: request.targets().clone(),
        };
        debug!(%token, targets = request.targets().len(), "Publish submitted");
        Ok(PendingPublish { token, request })
    }

    /// Apply the service's answer to the submission identified by `token`.
    ///
    /// Returns `Ok(None)` when the token no longer matches the in-flight
    /// submission; the response is then ignored.
    #[instrument(skip(self, result), fields(%token))]
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        result: PagecastResult<PublishOutcome>,
    ) -> PagecastResult<Option<PublishOutcome>> {
        let targets = match &self.state {
            PublishState::Submitting { token: current, targets } if *current == token => {
                targets.clone()
            }
            _ => {
                debug!("Discarding stale publish response");
                return Ok(None);
            }
        };

        self.state = PublishState::Idle;
        self.progress.finish();

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                match err.kind() {
                    PagecastErrorKind::Connection(_) => error!(error = %err, "Publish transport failure"),
                    _ => warn!(error = %err, "Publish rejected"),
                }
                self.events.notify(NoticeLevel::Error, err.notice_text());
                return Err(err);
            }
        };

        self.last_outcome = Some(outcome.clone());

        if outcome.is_complete_success(&targets) {
            self.reset_form();
            self.events.notify(
                NoticeLevel::Success,
                format!("Published to {} page(s)", outcome.successful_count()),
            );
            return Ok(Some(outcome));
        }

        let mut failed: Vec<FailedTarget> = outcome
            .failed()
            .map(|(id, result)| FailedTarget::new(id.clone(), result.message().clone()))
            .collect();
        failed.extend(
            outcome
                .missing(&targets)
                .map(|id| FailedTarget::new(id.clone(), "No result reported")),
        );
        let err: PagecastError = PartialOutcomeError::new(failed, outcome.successful_count()).into();
        warn!(error = %err, "Publish partially failed");
        self.events.notify(NoticeLevel::Error, err.notice_text());
        Err(err)
    }

    /// Build, send and interpret one publish, ticking the progress meanwhile.
    #[instrument(skip_all)]
    pub async fn submit(&mut self, api: &dyn ConsoleApi) -> PagecastResult<PublishOutcome> {
        let pending = self.begin_submit()?;

        let result = {
            let call = api.publish(&pending.request);
            tokio::pin!(call);
            let mut ticker = tokio::time::interval(self.progress_config.period());
            ticker.tick().await;
            loop {
                tokio::select! {
                    result = &mut call => break result,
                    _ = ticker.tick() => {
                        self.progress.tick();
                    }
                }
            }
        };

        self.complete(pending.token, result)?
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::StaleResponse).into())
    }

    /// Drop any in-flight submission without touching the form.
    ///
    /// A response arriving later is discarded.
    pub fn abandon(&mut self) {
        if self.is_submitting() {
            debug!("Abandoning in-flight publish");
            self.state = PublishState::Idle;
            self.progress.reset();
        }
    }

    fn reset_form(&mut self) {
        self.form.clear();
        self.selection.clear();
        self.staging.clear();
    }
}
