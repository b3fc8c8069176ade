//! Campaign and audience commands.

use super::commands::{AudienceArgs, AudienceCommands, CampaignArgs, CampaignCommands};
use super::console::Console;
use pagecast::{
    Audience, AudienceDraft, AudienceEstimate, AudienceEstimateRequest, AudienceMode,
    CampaignRecord, CampaignWizard, ConsoleActions, ConsoleApi, InterestQuery, JsonError, PagecastResult,
    ValidationError, ValidationErrorKind,
};

/// Handle campaign commands.
pub async fn handle_campaign_command(console: &Console, cmd: CampaignCommands) -> PagecastResult<()> {
    let actions = ConsoleActions::new(console.events.clone());
    match cmd {
        CampaignCommands::Create(args) => create_campaign(console, *args).await,
        CampaignCommands::List => {
            let campaigns = console.api.list_campaigns().await?;
            console.emit(&campaigns, |campaigns| print_campaigns(campaigns))
        }
        CampaignCommands::Toggle { id, status } => {
            let status = actions.toggle_campaign(&console.api, &id, status).await?;
            console.emit(&status, |status| println!("{} is now {}", id, status))
        }
        CampaignCommands::Delete { id } => {
            actions.delete_campaign(&console.api, &id).await?;
            console.emit(&id, |id| println!("Deleted {}", id))
        }
    }
}

fn print_campaigns(campaigns: &[CampaignRecord]) {
    println!(
        "{:<20} {:<28} {:<16} {:<7} {:>9} {:>9} {:>5} {:>8} {:>7} {:>6}",
        "ID", "NAME", "OBJECTIVE", "STATUS", "BUDGET", "SPENT", "USED", "REACH", "CLICKS", "CPC"
    );
    for campaign in campaigns {
        println!(
            "{:<20} {:<28} {:<16} {:<7} {:>9.2} {:>9.2} {:>4.0}% {:>8} {:>7} {:>6.2}",
            campaign.id(),
            campaign.name(),
            campaign.objective().to_string(),
            campaign.status().to_string(),
            campaign.budget(),
            campaign.spent(),
            campaign.spend_ratio() * 100.0,
            campaign.reach(),
            campaign.clicks(),
            campaign.cost_per_click()
        );
    }
}

/// Run the wizard step by step, stopping at the first rejected step.
async fn create_campaign(console: &Console, args: CampaignArgs) -> PagecastResult<()> {
    let mut wizard = CampaignWizard::new(console.events.clone());

    let form = wizard.campaign_form_mut();
    form.name = args.name;
    form.objective = Some(args.objective);
    form.budget = Some(args.budget);
    let step = wizard.next_step()?;
    tracing::debug!(%step, "Campaign step accepted");

    let targeting = args.targeting.to_targeting()?;
    let form = wizard.ad_set_form_mut();
    form.name = args.adset_name;
    form.audience_mode = Some(args.audience);
    form.daily_budget = Some(args.daily_budget);
    form.start_date = Some(args.start);
    form.end_date = args.end;
    form.saved_audience_id = args.saved_audience;
    if args.audience == AudienceMode::Custom {
        form.targeting = targeting;
    }
    let step = wizard.next_step()?;
    tracing::debug!(%step, "Ad set step accepted");

    let form = wizard.creative_form_mut();
    form.name = args.ad_name;
    form.format = Some(args.ad_format);
    form.page_id = args.page;
    form.headline = args.headline;
    form.body_text = args.text;
    form.description = args.description;
    form.destination_url = args.url.unwrap_or_default();
    form.call_to_action = Some(args.cta);
    if !console.json() {
        let creative = wizard.creative_form();
        for (label, counter) in [
            ("headline", creative.headline_counter()),
            ("text", creative.body_counter()),
            ("description", creative.description_counter()),
        ] {
            if counter.over_limit() {
                eprintln!("Note: {} is {} characters, longer than advised", label, counter);
            }
        }
    }
    wizard.next_step()?;

    let estimate = wizard.review().ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::CampaignStep {
            step: 4,
            reason: "review is not available".to_string(),
        })
    })?;
    if !console.json() {
        println!(
            "Estimated daily reach {} | clicks {} | cost per click {:.2} EUR",
            estimate.reach(),
            estimate.clicks(),
            estimate.cost_per_click()
        );
    }

    if args.dry_run {
        return console.emit(wizard.draft(), |_| println!("Dry run, nothing submitted"));
    }

    let receipt = wizard.submit(&console.api).await?;
    console.emit(&receipt, |receipt| match &receipt.campaign_id {
        Some(id) => println!("Campaign created: {}", id),
        None => println!("Campaign created"),
    })
}

/// Handle audience commands.
pub async fn handle_audience_command(console: &Console, cmd: AudienceCommands) -> PagecastResult<()> {
    let actions = ConsoleActions::new(console.events.clone());
    match cmd {
        AudienceCommands::List => {
            let audiences = console.api.list_audiences().await?;
            console.emit(&audiences, |audiences| {
                for audience in audiences {
                    print_audience(audience);
                }
                println!("Total: {} audiences", audiences.len());
            })
        }
        AudienceCommands::Create(audience) => {
            let saved = actions
                .save_audience(&console.api, None, &draft_from(audience)?)
                .await?;
            console.emit(&saved, print_audience)
        }
        AudienceCommands::Update { id, audience } => {
            let saved = actions
                .save_audience(&console.api, Some(&id), &draft_from(audience)?)
                .await?;
            console.emit(&saved, print_audience)
        }
        AudienceCommands::Delete { id } => {
            actions.delete_audience(&console.api, &id).await?;
            console.emit(&id, |id| println!("Deleted {}", id))
        }
        AudienceCommands::Duplicate { id } => {
            let copy = actions.duplicate_audience(&console.api, &id).await?;
            console.emit(&copy, print_audience)
        }
        AudienceCommands::Estimate { kind, targeting } => {
            let targeting = serde_json::to_value(targeting.to_targeting()?)
                .map_err(|e| JsonError::new(format!("Failed to encode targeting: {}", e)))?;
            let request = AudienceEstimateRequest::new(targeting, kind);
            let estimate = console.api.estimate_audience(&request).await?;
            console.emit(&estimate, print_estimate)
        }
        AudienceCommands::Interests { query } => {
            let query = InterestQuery::new(&query)?;
            let interests = console.api.search_interests(&query).await?;
            console.emit(&interests, |interests| {
                for interest in interests {
                    println!(
                        "{:<24} {:<28} {}",
                        interest.id(),
                        interest.name(),
                        interest.category()
                    );
                }
                println!("{} match(es) for '{}'", interests.len(), query.as_str());
            })
        }
    }
}

fn print_estimate(estimate: &AudienceEstimate) {
    let cost = estimate.cost_estimate();
    println!(
        "Size {} ({}) | CPM {:.2} EUR | suggested {:.2} EUR/day for ~{} people/day",
        estimate.size(),
        estimate.reach_potential(),
        cost.cpm,
        cost.suggested_daily_budget,
        cost.estimated_daily_reach
    );
    for advice in estimate.recommendations() {
        println!("[{}] {} {}", advice.kind(), advice.message(), advice.suggestion());
    }
}

fn draft_from(args: AudienceArgs) -> PagecastResult<AudienceDraft> {
    let draft = AudienceDraft::builder()
        .name(args.name)
        .description(args.description)
        .kind(args.kind)
        .build()
        .map_err(|e| {
            ValidationError::new(ValidationErrorKind::InvalidField {
                field: "audience".to_string(),
                reason: e.to_string(),
            })
        })?;
    Ok(draft)
}

fn print_audience(audience: &Audience) {
    println!(
        "{:<20} {:<40} {:<10} {}",
        audience.id(),
        audience.label(),
        audience.kind().to_string(),
        audience.description()
    );
}
