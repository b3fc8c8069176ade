//! Error types for the Pagecast publishing console.
//!
//! This crate provides the foundation error types used throughout the Pagecast workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The four user-facing categories map onto the console's failure taxonomy:
//! - [`ValidationError`] - client-side, raised before anything touches the network
//! - [`SubmissionError`] - the service answered and reported an explicit failure
//! - [`ConnectionError`] - the request never produced a usable answer
//! - [`PartialOutcomeError`] - a multi-page publish where some pages failed
//!
//! # Examples
//!
//! ```
//! use pagecast_error::{PagecastResult, ValidationError, ValidationErrorKind};
//!
//! fn check(message: &str) -> PagecastResult<()> {
//!     if message.trim().is_empty() {
//!         Err(ValidationError::new(ValidationErrorKind::EmptyMessage))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check("   ").is_err());
//! assert!(check("hello").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod connection;
mod error;
mod json;
mod partial;
mod submission;
mod validation;
mod workflow;

pub use auth::AuthError;
pub use config::ConfigError;
pub use connection::ConnectionError;
pub use error::{PagecastError, PagecastErrorKind, PagecastResult};
pub use json::JsonError;
pub use partial::{FailedTarget, PartialOutcomeError};
pub use submission::SubmissionError;
pub use validation::{ValidationError, ValidationErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
