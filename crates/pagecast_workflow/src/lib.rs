//! Console workflows for Pagecast.
//!
//! Each workflow is an owned state machine with explicit construction and
//! reset. Network calls go through [`pagecast_interface::ConsoleApi`]; every
//! workflow also exposes a `begin_submit`/`complete` pair so callers can drive
//! the request themselves and abandon it without cancelling it.
//!
//! - [`PublishCoordinator`] - one message to many pages, with per-page outcome
//! - [`BoostWorkflow`] - promotion of a single post
//! - [`CampaignWizard`] - four-step campaign creation
//! - [`PostsFeed`] - post listing with an opt-in cached fallback
//! - [`ConsoleActions`] - validated management calls
//!
//! Results are announced on an [`EventBus`] and collected by a [`NoticeBoard`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod boost;
mod builder;
mod events;
mod fallback;
mod manage;
mod notices;
mod progress;
mod publish;
mod selection;
mod staging;
mod token;
mod wizard;

pub use boost::{BoostForm, BoostPreview, BoostState, BoostWorkflow, PendingBoost, PreviewSource};
pub use builder::PublishRequestBuilder;
pub use events::{ConsoleEvent, EventBus, NoticeLevel};
pub use fallback::{FallbackPolicy, PostsFeed, PostsFetch};
pub use manage::ConsoleActions;
pub use notices::{Notice, NoticeBoard};
pub use progress::{MAX_PROGRESS_CAP, ProgressConfig, ProgressStage, SimulatedProgress};
pub use publish::{PendingPublish, PublishCoordinator, PublishState};
pub use selection::TargetSelectionSet;
pub use staging::MediaStagingArea;
pub use token::SubmissionToken;
pub use wizard::{
    AdSetForm, CampaignForm, CampaignWizard, CreativeForm, PendingCampaign, WizardState,
    WizardStep,
};
