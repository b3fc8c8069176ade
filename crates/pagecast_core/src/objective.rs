//! Advertising objectives.

use serde::{Deserialize, Serialize};

/// What a boost or campaign optimizes for.
///
/// # Examples
///
/// ```
/// use pagecast_core::Objective;
/// use std::str::FromStr;
///
/// assert_eq!(Objective::from_str("POST_ENGAGEMENT").unwrap(), Objective::PostEngagement);
/// assert_eq!(Objective::Reach.to_string(), "REACH");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Objective {
    /// Maximize the number of people who see the content
    #[default]
    Reach,
    /// Drive clicks to a destination
    Traffic,
    /// Reactions, comments and shares on the page
    Engagement,
    /// Engagement on one specific post
    PostEngagement,
    /// Actions on an external site
    Conversions,
}
