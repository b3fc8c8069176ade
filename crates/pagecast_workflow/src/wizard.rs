//! Four-step campaign creation wizard.

use crate::{ConsoleEvent, EventBus, NoticeLevel, SubmissionToken, token::TokenSequence};
use chrono::NaiveDate;
use derive_getters::Getters;
use pagecast_core::{
    Ad, AdFormat, AdSet, AudienceMode, CallToAction, Campaign, CampaignDraft, CampaignEstimate,
    CampaignReceipt, CharCounter, CustomTargeting, Objective,
};
use pagecast_error::{
    PagecastResult, ValidationError, ValidationErrorKind, WorkflowError, WorkflowErrorKind,
};
use pagecast_interface::ConsoleApi;
use tracing::{debug, instrument, warn};

/// Wizard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum WizardStep {
    /// Name, objective, total budget
    #[strum(serialize = "campaign")]
    Campaign,
    /// Audience, daily budget, schedule
    #[strum(serialize = "ad set")]
    AdSet,
    /// Ad text and destination
    #[strum(serialize = "creative")]
    Creative,
    /// Summary and estimate
    #[strum(serialize = "review")]
    Review,
}

impl WizardStep {
    /// 1-based position.
    pub fn number(self) -> u8 {
        match self {
            Self::Campaign => 1,
            Self::AdSet => 2,
            Self::Creative => 3,
            Self::Review => 4,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Campaign => Some(Self::AdSet),
            Self::AdSet => Some(Self::Creative),
            Self::Creative => Some(Self::Review),
            Self::Review => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            Self::Campaign => None,
            Self::AdSet => Some(Self::Campaign),
            Self::Creative => Some(Self::AdSet),
            Self::Review => Some(Self::Creative),
        }
    }
}

/// Wizard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum WizardState {
    /// Showing a step
    #[display("editing {}", _0)]
    Editing(WizardStep),
    /// Draft sent, waiting for the service
    #[display("submitting {}", _0)]
    Submitting(SubmissionToken),
}

/// Step 1 inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignForm {
    /// Campaign name
    pub name: String,
    /// Advertising objective
    pub objective: Option<Objective>,
    /// Total budget
    pub budget: Option<f64>,
}

/// Step 2 inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdSetForm {
    /// Ad set name
    pub name: String,
    /// How the audience is chosen
    pub audience_mode: Option<AudienceMode>,
    /// Daily budget
    pub daily_budget: Option<f64>,
    /// First day
    pub start_date: Option<NaiveDate>,
    /// Last day, open-ended when absent
    pub end_date: Option<NaiveDate>,
    /// Required in saved mode
    pub saved_audience_id: Option<String>,
    /// Used in custom mode
    pub targeting: CustomTargeting,
}

/// Step 3 inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreativeForm {
    /// Ad name
    pub name: String,
    /// Ad format
    pub format: Option<AdFormat>,
    /// Page the ad runs from
    pub page_id: String,
    /// Headline
    pub headline: String,
    /// Primary text
    pub body_text: String,
    /// Link description
    pub description: String,
    /// Landing page
    pub destination_url: String,
    /// Button label
    pub call_to_action: Option<CallToAction>,
}

impl CreativeForm {
    /// Headline length against its advisory limit.
    pub fn headline_counter(&self) -> CharCounter {
        CharCounter::new(&self.headline, Ad::HEADLINE_MAX)
    }

    /// Primary text length against its advisory limit.
    pub fn body_counter(&self) -> CharCounter {
        CharCounter::new(&self.body_text, Ad::BODY_MAX)
    }

    /// Description length against its advisory limit.
    pub fn description_counter(&self) -> CharCounter {
        CharCounter::new(&self.description, Ad::DESCRIPTION_MAX)
    }
}

/// A draft that has been handed out for sending.
#[derive(Debug, Clone, Getters)]
pub struct PendingCampaign {
    token: SubmissionToken,
    draft: CampaignDraft,
}

const MIN_CAMPAIGN_BUDGET: f64 = 10.0;
const MIN_DAILY_BUDGET: f64 = 5.0;

/// Linear campaign creation flow.
///
/// Each step's inputs are copied into the draft only when the step passes
/// validation on [`next_step`](Self::next_step). Going back never loses data.
///
/// # Examples
///
/// ```
/// use pagecast_core::Objective;
/// use pagecast_workflow::{CampaignWizard, EventBus, WizardStep};
///
/// let mut wizard = CampaignWizard::new(EventBus::default());
/// wizard.campaign_form_mut().name = "Spring sale".into();
/// wizard.campaign_form_mut().objective = Some(Objective::Traffic);
/// wizard.campaign_form_mut().budget = Some(5.0);
/// assert!(wizard.next_step().is_err());
///
/// wizard.campaign_form_mut().budget = Some(10.0);
/// assert_eq!(wizard.next_step().unwrap(), WizardStep::AdSet);
/// ```
#[derive(Debug)]
pub struct CampaignWizard {
    state: WizardState,
    campaign_form: CampaignForm,
    ad_set_form: AdSetForm,
    creative_form: CreativeForm,
    draft: CampaignDraft,
    tokens: TokenSequence,
    events: EventBus,
}

impl CampaignWizard {
    /// Wizard on step 1 with empty forms.
    pub fn new(events: EventBus) -> Self {
        Self {
            state: WizardState::Editing(WizardStep::Campaign),
            campaign_form: CampaignForm::default(),
            ad_set_form: AdSetForm::default(),
            creative_form: CreativeForm::default(),
            draft: CampaignDraft::default(),
            tokens: TokenSequence::default(),
            events,
        }
    }

    /// Current state.
    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Step shown, or `None` while submitting.
    pub fn step(&self) -> Option<WizardStep> {
        match self.state {
            WizardState::Editing(step) => Some(step),
            WizardState::Submitting(_) => None,
        }
    }

    /// Validated data so far.
    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    /// Step 1 inputs.
    pub fn campaign_form(&self) -> &CampaignForm {
        &self.campaign_form
    }

    /// Editable step 1 inputs.
    pub fn campaign_form_mut(&mut self) -> &mut CampaignForm {
        &mut self.campaign_form
    }

    /// Step 2 inputs.
    pub fn ad_set_form(&self) -> &AdSetForm {
        &self.ad_set_form
    }

    /// Editable step 2 inputs.
    pub fn ad_set_form_mut(&mut self) -> &mut AdSetForm {
        &mut self.ad_set_form
    }

    /// Step 3 inputs.
    pub fn creative_form(&self) -> &CreativeForm {
        &self.creative_form
    }

    /// Editable step 3 inputs.
    pub fn creative_form_mut(&mut self) -> &mut CreativeForm {
        &mut self.creative_form
    }

    /// Validate the current step, commit it to the draft and move forward.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn next_step(&mut self) -> PagecastResult<WizardStep> {
        let step = self.editing_step("advance")?;
        let next = step
            .next()
            .ok_or_else(|| WorkflowError::invalid(self.state, "advance"))?;

        let committed = match step {
            WizardStep::Campaign => self.commit_campaign(),
            WizardStep::AdSet => self.commit_ad_set(),
            WizardStep::Creative => self.commit_creative(),
            WizardStep::Review => Ok(()),
        };
        if let Err(err) = committed {
            debug!(error = %err, "Step rejected");
            self.events.notify(NoticeLevel::Error, err.kind().to_string());
            return Err(err.into());
        }

        self.state = WizardState::Editing(next);
        debug!(%next, "Wizard advanced");
        Ok(next)
    }

    /// Move back one step, keeping every input.
    pub fn prev_step(&mut self) -> PagecastResult<WizardStep> {
        let step = self.editing_step("go back")?;
        let prev = step
            .prev()
            .ok_or_else(|| WorkflowError::invalid(self.state, "go back"))?;
        self.state = WizardState::Editing(prev);
        Ok(prev)
    }

    /// Estimate shown on the review step.
    pub fn review(&self) -> Option<CampaignEstimate> {
        match self.state {
            WizardState::Editing(WizardStep::Review) => Some(self.draft.estimate()),
            _ => None,
        }
    }

    /// Mark the draft as in flight. Only allowed from the review step.
    pub fn begin_submit(&mut self) -> PagecastResult<PendingCampaign> {
        match self.state {
            WizardState::Submitting(_) => {
                return Err(WorkflowError::new(WorkflowErrorKind::AlreadySubmitting).into());
            }
            WizardState::Editing(WizardStep::Review) if self.draft.is_complete() => {}
            WizardState::Editing(_) => {
                return Err(WorkflowError::invalid(self.state, "submit").into());
            }
        }

        let token = self.tokens.issue();
        self.state = WizardState::Submitting(token);
        debug!(%token, "Campaign submitted");
        Ok(PendingCampaign {
            token,
            draft: self.draft.clone(),
        })
    }

    /// Apply the service's answer to the draft identified by `token`.
    ///
    /// Returns `Ok(None)` when the wizard was reset since; the response is
    /// then ignored.
    #[instrument(skip(self, result), fields(%token))]
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        result: PagecastResult<CampaignReceipt>,
    ) -> PagecastResult<Option<CampaignReceipt>> {
        if self.state != WizardState::Submitting(token) {
            debug!("Discarding stale campaign response");
            return Ok(None);
        }

        match result {
            Ok(receipt) => {
                self.reset();
                self.events
                    .notify(NoticeLevel::Success, "Campaign created");
                self.events.emit(ConsoleEvent::CampaignsRefreshRequested);
                Ok(Some(receipt))
            }
            Err(err) => {
                warn!(error = %err, "Campaign submission failed");
                self.state = WizardState::Editing(WizardStep::Review);
                self.events.notify(NoticeLevel::Error, err.notice_text());
                Err(err)
            }
        }
    }

    /// Send the reviewed draft and interpret the answer.
    pub async fn submit(&mut self, api: &dyn ConsoleApi) -> PagecastResult<CampaignReceipt> {
        let pending = self.begin_submit()?;
        let result = api.submit_campaign(&pending.draft).await;
        self.complete(pending.token, result)?
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::StaleResponse).into())
    }

    /// Back to step 1 with empty forms and draft.
    pub fn reset(&mut self) {
        self.state = WizardState::Editing(WizardStep::Campaign);
        self.campaign_form = CampaignForm::default();
        self.ad_set_form = AdSetForm::default();
        self.creative_form = CreativeForm::default();
        self.draft = CampaignDraft::default();
    }

    fn editing_step(&self, action: &str) -> PagecastResult<WizardStep> {
        match self.state {
            WizardState::Editing(step) => Ok(step),
            WizardState::Submitting(_) => Err(WorkflowError::invalid(self.state, action).into()),
        }
    }

    fn commit_campaign(&mut self) -> Result<(), ValidationError> {
        let form = &self.campaign_form;
        let name = required(1, &form.name, "campaign name is required")?;
        let objective = form
            .objective
            .ok_or_else(|| step_error(1, "objective is required"))?;
        let budget = at_least(1, form.budget, MIN_CAMPAIGN_BUDGET, "budget must be at least 10")?;

        self.draft.campaign = Some(Campaign::new(name, objective, budget));
        Ok(())
    }

    fn commit_ad_set(&mut self) -> Result<(), ValidationError> {
        let form = &self.ad_set_form;
        let name = required(2, &form.name, "ad set name is required")?;
        let mode = form
            .audience_mode
            .ok_or_else(|| step_error(2, "audience is required"))?;
        let daily_budget = at_least(
            2,
            form.daily_budget,
            MIN_DAILY_BUDGET,
            "daily budget must be at least 5",
        )?;
        let start_date = form
            .start_date
            .ok_or_else(|| step_error(2, "start date is required"))?;
        let saved_audience_id = match mode {
            AudienceMode::Saved => Some(
                form.saved_audience_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| step_error(2, "select a saved audience"))?
                    .to_string(),
            ),
            AudienceMode::Auto | AudienceMode::Custom => None,
        };

        self.draft.ad_set = Some(AdSet::new(
            name,
            mode,
            daily_budget,
            start_date,
            form.end_date,
            saved_audience_id,
            Some(form.targeting.clone()),
        ));
        Ok(())
    }

    fn commit_creative(&mut self) -> Result<(), ValidationError> {
        let form = &self.creative_form;
        let name = required(3, &form.name, "ad name is required")?;
        let format = form
            .format
            .ok_or_else(|| step_error(3, "format is required"))?;
        let page_id = required(3, &form.page_id, "page is required")?;
        let headline = required(3, &form.headline, "headline is required")?;
        let body_text = required(3, &form.body_text, "primary text is required")?;
        let description = required(3, &form.description, "description is required")?;
        let call_to_action = form
            .call_to_action
            .ok_or_else(|| step_error(3, "call to action is required"))?;
        let destination_url = Some(form.destination_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        self.draft.ad = Some(Ad::new(
            name,
            format,
            page_id,
            headline,
            body_text,
            description,
            destination_url,
            call_to_action,
        ));
        Ok(())
    }
}

#[track_caller]
fn step_error(step: u8, reason: &str) -> ValidationError {
    ValidationError::new(ValidationErrorKind::CampaignStep {
        step,
        reason: reason.to_string(),
    })
}

fn required<'a>(step: u8, value: &'a str, reason: &str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(step_error(step, reason))
    } else {
        Ok(value)
    }
}

fn at_least(step: u8, value: Option<f64>, min: f64, reason: &str) -> Result<f64, ValidationError> {
    match value {
        Some(v) if v >= min => Ok(v),
        _ => Err(step_error(step, reason)),
    }
}
