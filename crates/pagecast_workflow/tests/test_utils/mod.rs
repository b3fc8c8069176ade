//! Test utilities for workflow tests.

pub mod mock_console;

#[allow(unused_imports)]
pub use mock_console::MockConsoleApi;

use pagecast_core::{PublishOutcome, TargetOutcome};
use std::collections::BTreeMap;

/// Outcome with one entry per `(page id, success)` pair.
#[allow(dead_code)]
pub fn outcome(results: &[(&str, bool)]) -> PublishOutcome {
    let results: BTreeMap<String, TargetOutcome> = results
        .iter()
        .map(|(id, ok)| {
            let message = if *ok { "Published" } else { "Permission denied" };
            (id.to_string(), TargetOutcome::new(*ok, message))
        })
        .collect();
    PublishOutcome::from_results(results, None)
}
