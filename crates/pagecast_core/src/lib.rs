//! Core data types for the Pagecast publishing console.
//!
//! This crate provides the domain records exchanged with the publishing service
//! (pages, posts, boosts, campaigns, audiences, settings) and the small derived
//! calculations the console shows next to them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analytics;
mod audience;
mod boost;
mod campaign;
mod media;
mod objective;
mod publish;
mod settings;
mod target;
mod telemetry;

pub use analytics::{
    DashboardOverview, PerformanceStats, PostPerformance, PostStatus, PostsReport, RecentActivity,
    ScheduledPost, sort_by_schedule,
};
pub use audience::{
    Audience, AudienceDraft, AudienceDraftBuilder, AudienceEstimate, AudienceEstimateRequest,
    AudienceKind, AudienceRecommendation, CostEstimate, Interest, InterestQuery,
    RecommendationKind,
};
pub use boost::{
    AudienceMode, BoostReceipt, BoostRequest, BudgetSummary, CustomTargeting,
    CustomTargetingBuilder, Gender,
};
pub use campaign::{
    Ad, AdFormat, AdSet, CallToAction, Campaign, CampaignDraft, CampaignEstimate, CampaignRecord,
    CampaignReceipt, CampaignStatus, CharCounter,
};
pub use media::{MediaAsset, MediaKind, normalize_content_type};
pub use objective::Objective;
pub use publish::{PublishOutcome, PublishRequest, PublishSummary, TargetOutcome};
pub use settings::{Settings, SettingsUpdate};
pub use target::{ConnectionStatus, Target};
pub use telemetry::init_tracing;
