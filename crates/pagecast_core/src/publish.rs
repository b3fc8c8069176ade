//! Multi-page publish requests and their aggregate outcome.

use crate::MediaAsset;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable snapshot of one publish action.
///
/// Requests are assembled and validated by the publish workflow; once built,
/// later edits to the form do not affect a request that is already in flight.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PublishRequest {
    message: String,
    link: Option<String>,
    targets: Vec<String>,
    media: Vec<MediaAsset>,
}

impl PublishRequest {
    /// Assemble a request from already-validated parts.
    pub fn new(
        message: impl Into<String>,
        link: Option<String>,
        targets: Vec<String>,
        media: Vec<MediaAsset>,
    ) -> Self {
        Self {
            message: message.into(),
            link,
            targets,
            media,
        }
    }

    /// Whether the request must be sent as multipart form data.
    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

/// What happened on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TargetOutcome {
    success: bool,
    #[serde(default)]
    message: String,
}

impl TargetOutcome {
    /// Create an outcome record.
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
        }
    }
}

/// Counts reported alongside the per-page results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSummary {
    /// Pages that accepted the post
    pub successful: usize,
    /// Pages that rejected the post
    pub failed: usize,
}

/// Per-page results of one publish, produced atomically by the service.
///
/// # Examples
///
/// ```
/// use pagecast_core::{PublishOutcome, TargetOutcome};
/// use std::collections::BTreeMap;
///
/// let mut results = BTreeMap::new();
/// results.insert("p1".to_string(), TargetOutcome::new(true, "posted"));
/// results.insert("p2".to_string(), TargetOutcome::new(false, "token expired"));
///
/// let outcome = PublishOutcome::from_results(results, None);
/// assert_eq!(outcome.summary().successful, 1);
/// assert_eq!(outcome.summary().failed, 1);
/// assert!(!outcome.is_complete_success(&["p1".to_string(), "p2".to_string()]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PublishOutcome {
    results: BTreeMap<String, TargetOutcome>,
    summary: PublishSummary,
}

impl PublishOutcome {
    /// Build an outcome, deriving the summary from the results when the service omitted it.
    pub fn from_results(
        results: BTreeMap<String, TargetOutcome>,
        summary: Option<PublishSummary>,
    ) -> Self {
        let successful = results.values().filter(|r| r.success).count();
        let derived = PublishSummary {
            successful,
            failed: results.len() - successful,
        };
        let summary = match summary {
            Some(reported) if reported != derived => {
                tracing::debug!(
                    reported_ok = reported.successful,
                    reported_failed = reported.failed,
                    results = results.len(),
                    "Publish summary disagrees with per-page results"
                );
                reported
            }
            Some(reported) => reported,
            None => derived,
        };
        Self { results, summary }
    }

    /// Result for one page, if the service reported it.
    pub fn get(&self, target_id: &str) -> Option<&TargetOutcome> {
        self.results.get(target_id)
    }

    /// Pages that rejected the post, in id order.
    pub fn failed(&self) -> impl Iterator<Item = (&String, &TargetOutcome)> {
        self.results.iter().filter(|(_, r)| !r.success)
    }

    /// Number of pages that accepted the post.
    pub fn successful_count(&self) -> usize {
        self.results.values().filter(|r| r.success).count()
    }

    /// True only when every requested page is present and succeeded.
    ///
    /// A requested page missing from the results counts as a failure.
    pub fn is_complete_success(&self, requested: &[String]) -> bool {
        self.summary.failed == 0
            && self.results.values().all(|r| r.success)
            && requested.iter().all(|id| self.results.contains_key(id))
    }

    /// Requested pages the service did not report on.
    pub fn missing<'a>(&'a self, requested: &'a [String]) -> impl Iterator<Item = &'a String> {
        requested
            .iter()
            .filter(move |id| !self.results.contains_key(id.as_str()))
    }
}
