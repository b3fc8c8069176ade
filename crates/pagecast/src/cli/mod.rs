//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the pagecast binary.

mod ads;
mod commands;
mod console;
mod publishing;
mod settings;

pub use ads::{handle_audience_command, handle_campaign_command};
pub use commands::{Cli, Commands, DashboardCommands};
pub use console::Console;
pub use publishing::{boost_post, handle_pages_command, list_posts, publish};
pub use settings::{handle_settings_command, show_dashboard, show_scheduled_posts};
