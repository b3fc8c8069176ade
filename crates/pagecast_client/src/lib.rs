//! HTTP client and configuration for the Pagecast publishing console.
//!
//! [`HttpConsoleApi`] implements [`pagecast_interface::ConsoleApi`] over the
//! publishing service's REST routes. [`PagecastConfig`] gathers the console
//! settings from the bundled defaults, user files and the environment.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;

pub use client::HttpConsoleApi;
pub use config::{ApiConfig, BoostDefaults, FallbackConfig, PagecastConfig, PublishConfig};
