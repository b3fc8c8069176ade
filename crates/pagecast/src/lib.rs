//! Pagecast - publishing console for Facebook Pages
//!
//! Pagecast drives an external publishing service that talks to the Graph API
//! on its behalf. The console side owns the interaction state: which pages are
//! selected, which media are staged, what a boost or a campaign draft looks
//! like, and how the service's answers map back onto that state.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pagecast::{EventBus, HttpConsoleApi, MemoryTokenStore, PagecastConfig, PublishCoordinator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PagecastConfig::load()?;
//!     let api = HttpConsoleApi::new(config.api().clone(), Arc::new(MemoryTokenStore::with_token("...")))?;
//!
//!     let mut publish = PublishCoordinator::new(EventBus::default());
//!     publish.form_mut().set_message("New collection is live");
//!     publish.selection_mut().toggle("1234567890");
//!
//!     let outcome = publish.submit(&api).await?;
//!     println!("{} page(s) published", outcome.successful_count());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `pagecast_error` - Error types
//! - `pagecast_core` - Data model and estimates
//! - `pagecast_interface` - `ConsoleApi` trait and wire envelopes
//! - `pagecast_cache` - Post summary cache
//! - `pagecast_client` - HTTP client and configuration
//! - `pagecast_workflow` - Publish, boost and campaign state machines
//!
//! This crate (`pagecast`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub use pagecast_cache::*;
pub use pagecast_client::*;
pub use pagecast_core::*;
pub use pagecast_error::*;
pub use pagecast_interface::*;
pub use pagecast_workflow::*;
