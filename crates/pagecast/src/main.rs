//! Pagecast CLI binary.
//!
//! This binary drives the publishing service from the terminal:
//! - List and sync pages, publish to many pages at once
//! - Review post performance and boost posts
//! - Create and manage campaigns and saved audiences
//! - Store API credentials

use clap::Parser;
use pagecast::{PagecastConfig, PagecastResult};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, Console, DashboardCommands, boost_post, handle_audience_command, handle_campaign_command,
        handle_pages_command, handle_settings_command, list_posts, publish, show_dashboard,
        show_scheduled_posts,
    };

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let directive = if cli.verbose { "debug" } else { "info" };
    pagecast::init_tracing(directive)?;

    let config = match &cli.config {
        Some(path) => PagecastConfig::from_file(path)?,
        None => PagecastConfig::load()?,
    };
    let token = std::env::var("PAGECAST_TOKEN").ok().filter(|t| !t.is_empty());
    let mut console = Console::new(config, token, cli.format)?;

    // Execute the requested command
    let result: PagecastResult<()> = match cli.command {
        Commands::Pages(cmd) => handle_pages_command(&console, cmd).await,
        Commands::Publish(args) => publish(&console, args).await,
        Commands::Posts { page } => list_posts(&console, page).await,
        Commands::Boost(args) => boost_post(&console, args).await,
        Commands::Campaign(cmd) => handle_campaign_command(&console, cmd).await,
        Commands::Audiences(cmd) => handle_audience_command(&console, cmd).await,
        Commands::Settings(cmd) => handle_settings_command(&console, cmd).await,
        Commands::Dashboard { view } => match view.unwrap_or(DashboardCommands::Overview) {
            DashboardCommands::Overview => show_dashboard(&console).await,
            DashboardCommands::Scheduled => show_scheduled_posts(&console).await,
        },
    };

    console.flush_notices();

    if let Err(err) = result {
        tracing::debug!(error = %err, "Command failed");
        eprintln!("Error: {}", err.notice_text());
        std::process::exit(1);
    }

    Ok(())
}
