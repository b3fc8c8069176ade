//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pagecast::{
    AdFormat, AudienceKind, AudienceMode, CallToAction, CampaignStatus, Gender, Objective,
};
use std::path::PathBuf;

/// Pagecast - publish to many Facebook Pages, boost posts and build ad campaigns
#[derive(Parser, Debug)]
#[command(name = "pagecast")]
#[command(about = "Publish to many Facebook Pages, boost posts and build ad campaigns", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file only
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connected pages
    #[command(subcommand)]
    Pages(PagesCommands),

    /// Publish one message to several pages
    Publish(PublishArgs),

    /// Post performance
    Posts {
        /// Only show posts of this page name
        #[arg(long)]
        page: Option<String>,
    },

    /// Promote an existing post
    Boost(BoostArgs),

    /// Ad campaigns
    #[command(subcommand)]
    Campaign(CampaignCommands),

    /// Saved audiences
    #[command(subcommand)]
    Audiences(AudienceCommands),

    /// API credentials and preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Totals and recent activity, or queued posts
    Dashboard {
        #[command(subcommand)]
        view: Option<DashboardCommands>,
    },
}

/// Dashboard views
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommands {
    /// Totals and recent activity (default)
    Overview,
    /// Posts queued for later publication
    Scheduled,
}

/// Page subcommands
#[derive(Subcommand, Debug)]
pub enum PagesCommands {
    /// List pages known to the service
    List,
    /// Refresh pages from Facebook
    Sync,
}

/// Publish arguments
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Post text
    #[arg(long, short)]
    pub message: String,

    /// Link attached to the post
    #[arg(long)]
    pub link: Option<String>,

    /// Page id to publish to (repeatable)
    #[arg(long = "page", short)]
    pub pages: Vec<String>,

    /// Publish to every page known to the service
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,

    /// Image or video file to attach (repeatable)
    #[arg(long)]
    pub media: Vec<PathBuf>,
}

/// Boost arguments
#[derive(Args, Debug)]
pub struct BoostArgs {
    /// Post to promote
    pub post_id: String,

    /// Advertising objective (defaults from configuration)
    #[arg(long)]
    pub objective: Option<Objective>,

    /// Daily budget in euros (defaults from configuration)
    #[arg(long)]
    pub budget: Option<f64>,

    /// Duration in days (defaults from configuration)
    #[arg(long)]
    pub days: Option<u32>,

    /// How the audience is chosen
    #[arg(long, default_value = "auto")]
    pub audience: AudienceMode,

    /// Saved audience id, required with `--audience saved`
    #[arg(long)]
    pub saved_audience: Option<String>,

    #[command(flatten)]
    pub targeting: TargetingArgs,
}

/// Custom targeting arguments
#[derive(Args, Debug, Default)]
pub struct TargetingArgs {
    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// Minimum age
    #[arg(long)]
    pub age_min: Option<u8>,

    /// Maximum age
    #[arg(long)]
    pub age_max: Option<u8>,

    /// Gender
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Comma separated interests
    #[arg(long)]
    pub interests: Option<String>,
}

/// Campaign subcommands
#[derive(Subcommand, Debug)]
pub enum CampaignCommands {
    /// Walk through the campaign wizard and submit
    Create(Box<CampaignArgs>),
    /// List campaigns
    List,
    /// Switch a campaign between ACTIVE and PAUSED
    Toggle {
        /// Campaign id
        id: String,
        /// Current status
        #[arg(long, default_value = "ACTIVE")]
        status: CampaignStatus,
    },
    /// Delete a campaign
    Delete {
        /// Campaign id
        id: String,
    },
}

/// Campaign wizard inputs, one group per step
#[derive(Args, Debug)]
pub struct CampaignArgs {
    /// Campaign name
    #[arg(long)]
    pub name: String,
    /// Advertising objective
    #[arg(long)]
    pub objective: Objective,
    /// Total budget (at least 10)
    #[arg(long)]
    pub budget: f64,

    /// Ad set name
    #[arg(long)]
    pub adset_name: String,
    /// How the audience is chosen
    #[arg(long, default_value = "auto")]
    pub audience: AudienceMode,
    /// Saved audience id, required with `--audience saved`
    #[arg(long)]
    pub saved_audience: Option<String>,
    /// Daily budget (at least 5)
    #[arg(long)]
    pub daily_budget: f64,
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start: NaiveDate,
    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[command(flatten)]
    pub targeting: TargetingArgs,

    /// Ad name
    #[arg(long)]
    pub ad_name: String,
    /// Ad format
    #[arg(long, default_value = "single_image")]
    pub ad_format: AdFormat,
    /// Page the ad runs from
    #[arg(long)]
    pub page: String,
    /// Headline (40 characters advised)
    #[arg(long)]
    pub headline: String,
    /// Primary text (125 characters advised)
    #[arg(long)]
    pub text: String,
    /// Link description (30 characters advised)
    #[arg(long)]
    pub description: String,
    /// Landing page
    #[arg(long)]
    pub url: Option<String>,
    /// Button label
    #[arg(long, default_value = "LEARN_MORE")]
    pub cta: CallToAction,

    /// Stop at the review step without submitting
    #[arg(long)]
    pub dry_run: bool,
}

/// Audience subcommands
#[derive(Subcommand, Debug)]
pub enum AudienceCommands {
    /// List saved audiences
    List,
    /// Create an audience
    Create(AudienceArgs),
    /// Replace an audience's name and description
    Update {
        /// Audience id
        id: String,
        #[command(flatten)]
        audience: AudienceArgs,
    },
    /// Delete an audience
    Delete {
        /// Audience id
        id: String,
    },
    /// Copy an audience
    Duplicate {
        /// Audience id
        id: String,
    },
    /// Estimate the size and cost of a targeting definition
    Estimate {
        /// Audience kind
        #[arg(long, default_value = "custom")]
        kind: AudienceKind,
        #[command(flatten)]
        targeting: TargetingArgs,
    },
    /// Search interests usable in targeting
    Interests {
        /// At least two characters
        query: String,
    },
}

/// Audience fields
#[derive(Args, Debug)]
pub struct AudienceArgs {
    /// Audience name
    #[arg(long)]
    pub name: String,
    /// Description
    #[arg(long)]
    pub description: String,
    /// Audience kind
    #[arg(long, default_value = "custom")]
    pub kind: AudienceKind,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show stored settings (secrets are never displayed)
    Show,
    /// Store credentials and preferences
    Set {
        /// Facebook app id
        #[arg(long)]
        app_id: String,
        /// Facebook app secret
        #[arg(long, env = "PAGECAST_APP_SECRET")]
        app_secret: String,
        /// Long-lived page access token
        #[arg(long, env = "PAGECAST_ACCESS_TOKEN")]
        access_token: String,
        /// Receive email notifications
        #[arg(long)]
        email_notifications: bool,
        /// Receive automatic reports
        #[arg(long)]
        auto_reports: bool,
        /// Reporting timezone
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Check the stored credentials against Facebook
    Test,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
