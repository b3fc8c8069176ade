//! Settings and dashboard commands.

use super::commands::SettingsCommands;
use super::console::Console;
use pagecast::{
    ConsoleActions, ConsoleApi, PagecastResult, SettingsUpdate, SubmissionError, sort_by_schedule,
};

/// Handle settings commands.
pub async fn handle_settings_command(console: &Console, cmd: SettingsCommands) -> PagecastResult<()> {
    let actions = ConsoleActions::new(console.events.clone());
    match cmd {
        SettingsCommands::Show => {
            let settings = console.api.settings().await?;
            console.emit(&settings, |settings| {
                let stored = |present: bool| if present { "stored" } else { "missing" };
                println!("App id:              {}", settings.app_id());
                println!("App secret:          {}", stored(*settings.has_app_secret()));
                println!("Access token:        {}", stored(*settings.has_access_token()));
                println!("Email notifications: {}", settings.email_notifications());
                println!("Automatic reports:   {}", settings.auto_reports());
                println!("Timezone:            {}", settings.timezone());
                if !settings.is_configured() {
                    println!("Credentials are incomplete; run `pagecast settings set`.");
                }
            })
        }
        SettingsCommands::Set {
            app_id,
            app_secret,
            access_token,
            email_notifications,
            auto_reports,
            timezone,
        } => {
            let mut update = SettingsUpdate::new(app_id, app_secret, access_token)
                .with_notifications(email_notifications, auto_reports);
            if let Some(timezone) = timezone {
                update = update.with_timezone(timezone);
            }
            actions.save_settings(&console.api, &update).await
        }
        SettingsCommands::Test => {
            let check = actions.test_connection(&console.api).await?;
            console.emit(&check, |check| println!("{}", check.message))?;
            if check.success {
                Ok(())
            } else {
                Err(SubmissionError::new("test_connection", check.message).into())
            }
        }
    }
}

/// Print totals and recent activity.
pub async fn show_dashboard(console: &Console) -> PagecastResult<()> {
    let overview = console.api.dashboard().await?;
    console.emit(&overview, |overview| {
        println!(
            "Pages {} | Posts today {} | Reach {} | Engagement {}",
            overview.pages_count, overview.posts_today, overview.total_reach, overview.engagement
        );
        for activity in &overview.recent_activities {
            println!(
                "{:<20} {:<12} {:<10} {}",
                activity.time, activity.kind, activity.status, activity.activity
            );
        }
    })
}

/// Print queued posts, soonest first.
pub async fn show_scheduled_posts(console: &Console) -> PagecastResult<()> {
    let mut posts = console.api.scheduled_posts().await?;
    sort_by_schedule(&mut posts);
    console.emit(&posts, |posts| {
        if posts.is_empty() {
            println!("No scheduled posts");
            return;
        }
        for post in posts {
            let when = post
                .scheduled_time()
                .as_ref()
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "unscheduled".to_string());
            let text: String = post.message().chars().take(40).collect();
            println!(
                "{:<20} {:<12} {:<40} {}",
                when,
                post.status(),
                text,
                post.pages().join(", ")
            );
        }
    })
}
