//! Post listing with an explicit offline fallback.

use crate::{EventBus, NoticeLevel};
use derive_getters::Getters;
use pagecast_cache::SharedPostCache;
use pagecast_core::PostsReport;
use pagecast_error::PagecastResult;
use pagecast_interface::ConsoleApi;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// What to show when the post listing cannot be fetched.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report the error
    #[default]
    Disabled,
    /// Show the posts cached from earlier listings, flagged as stale
    CachedPosts,
}

impl FallbackPolicy {
    /// Policy for an on/off configuration switch.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::CachedPosts
        } else {
            Self::Disabled
        }
    }
}

/// A post listing and whether it came from the cache.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PostsFetch {
    report: PostsReport,
    stale: bool,
}

impl PostsFetch {
    /// Give up the listing.
    pub fn into_report(self) -> PostsReport {
        self.report
    }
}

/// Fetches post listings and keeps the post cache filled.
#[derive(Debug, Clone)]
pub struct PostsFeed {
    cache: SharedPostCache,
    policy: FallbackPolicy,
    events: EventBus,
}

impl PostsFeed {
    /// Feed filling `cache`, with fallback disabled.
    pub fn new(cache: SharedPostCache, events: EventBus) -> Self {
        Self {
            cache,
            policy: FallbackPolicy::Disabled,
            events,
        }
    }

    /// Change the fallback policy.
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active fallback policy.
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Cache filled by this feed.
    pub fn cache(&self) -> &SharedPostCache {
        &self.cache
    }

    /// Fetch the listing from the service.
    #[instrument(skip_all, fields(policy = %self.policy))]
    pub async fn refresh(&self, api: &dyn ConsoleApi) -> PagecastResult<PostsFetch> {
        let fetched = api.posts_performance().await;
        self.accept(fetched)
    }

    /// Interpret a listing result.
    ///
    /// Fresh listings are cached. A failure is served from the cache only when
    /// the policy allows it, the error is recoverable and the cache has posts.
    pub fn accept(&self, fetched: PagecastResult<PostsReport>) -> PagecastResult<PostsFetch> {
        match fetched {
            Ok(report) => {
                self.cache.store_report(&report);
                Ok(PostsFetch {
                    report,
                    stale: false,
                })
            }
            Err(err) => {
                if self.policy == FallbackPolicy::CachedPosts && err.is_recoverable() {
                    let report = self.cache.snapshot();
                    if !report.posts.is_empty() {
                        warn!(error = %err, posts = report.posts.len(), "Serving cached posts");
                        self.events
                            .notify(NoticeLevel::Info, "Showing cached posts, the service is unreachable");
                        return Ok(PostsFetch {
                            report,
                            stale: true,
                        });
                    }
                }
                self.events.notify(NoticeLevel::Error, err.notice_text());
                Err(err)
            }
        }
    }
}
