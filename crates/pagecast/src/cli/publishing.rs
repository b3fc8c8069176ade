//! Pages, publishing, post performance and boosts.

use super::commands::{BoostArgs, PagesCommands, PublishArgs, TargetingArgs};
use super::console::Console;
use pagecast::{
    AudienceMode, BoostForm, BoostWorkflow, ConsoleApi, CustomTargeting, FallbackPolicy, PagecastResult,
    PostsFeed, ProgressConfig, ProgressStage, PublishCoordinator, PublishOutcome, Target,
    ValidationError, ValidationErrorKind,
};
use std::io::Write;
use std::path::Path;

/// Handle page commands.
pub async fn handle_pages_command(console: &Console, cmd: PagesCommands) -> PagecastResult<()> {
    let pages = match cmd {
        PagesCommands::List => console.api.list_targets().await?,
        PagesCommands::Sync => console.api.sync_targets().await?,
    };
    console.emit(&pages, |pages| print_pages(pages))
}

fn print_pages(pages: &[Target]) {
    println!("{:<20} {:<32} {:>10}  {:<14} STATUS", "ID", "NAME", "FOLLOWERS", "CATEGORY");
    for page in pages {
        println!(
            "{:<20} {:<32} {:>10}  {:<14} {}",
            page.id(),
            page.name(),
            page.followers(),
            page.category(),
            page.status()
        );
    }
    println!("Total: {} pages", pages.len());
}

/// Publish one message to the selected pages.
pub async fn publish(console: &Console, args: PublishArgs) -> PagecastResult<()> {
    let publish = console.config.publish();
    let mut coordinator = PublishCoordinator::with_progress(
        console.events.clone(),
        ProgressConfig {
            tick: publish.tick(),
            cap: *publish.progress_cap(),
        },
    );

    coordinator.form_mut().set_message(args.message);
    if let Some(link) = args.link {
        coordinator.form_mut().set_link(link);
    }

    if args.all {
        let pages = console.api.list_targets().await?;
        coordinator
            .selection_mut()
            .select_all(pages.iter().map(|p| p.id().clone()));
    } else {
        for id in &args.pages {
            if !coordinator.selection().contains(id) {
                coordinator.selection_mut().toggle(id);
            }
        }
    }

    for path in &args.media {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ValidationError::new(ValidationErrorKind::InvalidField {
                field: "media".to_string(),
                reason: format!("{}: {}", path.display(), e),
            })
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !coordinator
            .staging_mut()
            .add(name, content_type_for(path), bytes)
        {
            tracing::warn!(path = %path.display(), "Skipping file that is neither image nor video");
        }
    }

    let reporter = if console.json() {
        None
    } else {
        let mut progress = coordinator.progress().watch();
        Some(tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                let value = *progress.borrow();
                eprint!("\r{:>3.0}% {:<20}", value, ProgressStage::for_value(value));
                let _ = std::io::stderr().flush();
                if value >= 100.0 {
                    eprintln!();
                    break;
                }
            }
        }))
    };

    let result = coordinator.submit(&console.api).await;
    if let Some(reporter) = reporter {
        reporter.abort();
    }

    match result {
        Ok(outcome) => print_outcome(console, &outcome),
        Err(err) => {
            if let Some(outcome) = coordinator.last_outcome() {
                print_outcome(console, outcome)?;
            }
            Err(err)
        }
    }
}

fn print_outcome(console: &Console, outcome: &PublishOutcome) -> PagecastResult<()> {
    console.emit(outcome.results(), |results| {
        for (page_id, result) in results {
            let mark = if *result.success() { "ok" } else { "failed" };
            println!("{:<20} {:<7} {}", page_id, mark, result.message());
        }
        println!(
            "{} successful, {} failed",
            outcome.summary().successful,
            outcome.summary().failed
        );
    })
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Show post performance, optionally for one page.
pub async fn list_posts(console: &Console, page: Option<String>) -> PagecastResult<()> {
    let policy = FallbackPolicy::from_enabled(*console.config.fallback().enabled());
    let feed = PostsFeed::new(console.cache.clone(), console.events.clone()).with_policy(policy);
    let fetch = feed.refresh(&console.api).await?;
    let stale = *fetch.stale();
    let report = fetch.into_report();

    let posts: Vec<_> = match page.as_deref() {
        Some(name) => report.for_page(name).cloned().collect(),
        None => report.posts.clone(),
    };

    console.emit(&posts, |posts| {
        if stale {
            println!("(cached data, the service is unreachable)");
        }
        println!(
            "{:<28} {:<20} {:>8} {:>10} {:<8} TEXT",
            "ID", "PAGE", "REACH", "ENGAGEMENT", "STATUS"
        );
        for post in posts {
            let text: String = post.message().chars().take(40).collect();
            println!(
                "{:<28} {:<20} {:>8} {:>10} {:<8} {}",
                post.id(),
                post.page_name(),
                post.reach(),
                post.engagement(),
                post.status(),
                text
            );
        }
        let stats = report.stats();
        println!(
            "Reach {} | Engagement {} | Shares {} | Boosted {}",
            stats.total_reach, stats.total_engagement, stats.total_shares, stats.boosted_posts_count
        );
        println!("Pages: {}", report.page_names().join(", "));
    })
}

impl TargetingArgs {
    /// Custom targeting from the flags given, defaults for the rest.
    pub fn to_targeting(&self) -> PagecastResult<CustomTargeting> {
        let mut builder = CustomTargeting::builder();
        if let Some(location) = &self.location {
            builder.location(location.clone());
        }
        if let Some(age_min) = self.age_min {
            builder.age_min(age_min);
        }
        if let Some(age_max) = self.age_max {
            builder.age_max(age_max);
        }
        if let Some(gender) = self.gender {
            builder.gender(gender);
        }
        if let Some(interests) = &self.interests {
            builder.interests(CustomTargeting::parse_interests(interests));
        }
        let targeting = builder.build().map_err(|e| {
            ValidationError::new(ValidationErrorKind::InvalidField {
                field: "targeting".to_string(),
                reason: e.to_string(),
            })
        })?;
        Ok(targeting)
    }
}

/// Boost one post.
pub async fn boost_post(console: &Console, args: BoostArgs) -> PagecastResult<()> {
    let defaults = console.config.boost();
    let mut workflow = BoostWorkflow::new(console.cache.clone(), console.events.clone())
        .with_defaults(BoostForm::new(
            *defaults.objective(),
            *defaults.daily_budget(),
            *defaults.duration_days(),
        ));

    let preview = workflow.open(&args.post_id, &console.api).await?;
    if !console.json() {
        match preview.details() {
            Some(details) => println!(
                "Boosting {} ({}): {}",
                preview.post_id(),
                preview.source(),
                details.excerpt(80)
            ),
            None => println!("Boosting {} (no preview available)", preview.post_id()),
        }
    }

    if let Some(objective) = args.objective {
        workflow.set_objective(objective)?;
    }
    if let Some(budget) = args.budget {
        workflow.set_daily_budget(budget)?;
    }
    if let Some(days) = args.days {
        workflow.set_duration_days(days)?;
    }
    match args.audience {
        AudienceMode::Auto => workflow.set_audience_mode(AudienceMode::Auto)?,
        AudienceMode::Custom => workflow.set_targeting(args.targeting.to_targeting()?)?,
        AudienceMode::Saved => {
            workflow.set_audience_mode(AudienceMode::Saved)?;
            if let Some(id) = args.saved_audience {
                workflow.set_saved_audience(id)?;
            }
        }
    }

    if !console.json() {
        let summary = workflow.budget_summary();
        let (low, high) = summary.reach_range();
        println!(
            "Total budget {:.2} EUR, estimated reach {} - {}",
            summary.total(),
            low,
            high
        );
    }

    let receipt = workflow.submit(&console.api).await?;
    console.emit(&receipt, |receipt| {
        println!("Boost created, estimated reach {}", receipt.estimated_reach);
    })
}
