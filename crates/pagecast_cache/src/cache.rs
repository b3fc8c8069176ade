//! Post summary cache implementation.

use derive_getters::Getters;
use pagecast_core::{PostPerformance, PostsReport};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache entry with value and expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    post: PostPerformance,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// Configuration for the post cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct PostCacheConfig {
    /// Lifetime of cached summaries (seconds)
    #[serde(default = "default_ttl")]
    ttl_secs: u64,

    /// Maximum cache size (number of posts)
    #[serde(default = "default_max_entries")]
    max_entries: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_ttl() -> u64 {
    600
}

fn default_max_entries() -> usize {
    500
}

fn default_enabled() -> bool {
    true
}

impl Default for PostCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
            enabled: default_enabled(),
        }
    }
}

impl PostCacheConfig {
    /// Creates a new config builder.
    pub fn builder() -> PostCacheConfigBuilder {
        PostCacheConfigBuilder::default()
    }
}

/// Cache of post summaries keyed by post id.
///
/// Entries expire after the configured TTL; when full, the least recently
/// used post is evicted.
///
/// # Example
///
/// ```
/// use pagecast_cache::{PostCache, PostCacheConfig};
/// use pagecast_core::{PostPerformance, PostsReport};
///
/// let mut cache = PostCache::new(PostCacheConfig::default());
/// let report = PostsReport::new(vec![PostPerformance::new("p1", "42", "Bakery", "Fresh bread")]);
///
/// cache.store_report(&report);
///
/// let entry = cache.get("p1").unwrap();
/// assert_eq!(entry.post().page_name(), "Bakery");
/// ```
#[derive(Debug)]
pub struct PostCache {
    config: PostCacheConfig,
    entries: HashMap<String, CacheEntry>,
    access_order: Vec<String>,
}

impl PostCache {
    /// Create a new post cache with configuration.
    pub fn new(config: PostCacheConfig) -> Self {
        tracing::debug!(
            ttl_secs = config.ttl_secs,
            max_entries = config.max_entries,
            enabled = config.enabled,
            "Creating new PostCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
        }
    }

    /// Insert every post of a listing.
    #[tracing::instrument(skip(self, report), fields(posts = report.posts.len()))]
    pub fn store_report(&mut self, report: &PostsReport) {
        for post in &report.posts {
            self.insert(post.clone());
        }
    }

    /// Insert or refresh one post summary.
    #[tracing::instrument(
        skip(self, post),
        fields(post_id = %post.id(), cache_size = self.entries.len())
    )]
    pub fn insert(&mut self, post: PostPerformance) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        let key = post.id().clone();
        if self.config.max_entries == 0 {
            return;
        }
        if self.entries.len() >= self.config.max_entries && !self.entries.contains_key(&key) {
            self.evict_lru();
        }

        self.touch(&key);

        let entry = CacheEntry {
            post,
            created_at: Instant::now(),
            ttl: Duration::from_secs(self.config.ttl_secs),
        };
        self.entries.insert(key, entry);
    }

    /// Get a cached post summary.
    ///
    /// Returns None if the post is unknown, expired, or caching is disabled.
    #[tracing::instrument(skip(self), fields(cache_size = self.entries.len()))]
    pub fn get(&mut self, post_id: &str) -> Option<&CacheEntry> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        let entry = self.entries.get(post_id)?;
        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            self.entries.remove(post_id);
            self.forget(post_id);
            return None;
        }

        self.touch(post_id);
        let entry = self.entries.get(post_id)?;
        tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        Some(entry)
    }

    /// Live summaries, most recently used last.
    pub fn posts(&self) -> Vec<&PostPerformance> {
        self.access_order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .filter(|entry| !entry.is_expired())
            .map(|entry| &entry.post)
            .collect()
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired());
        let entries = &self.entries;
        self.access_order.retain(|key| entries.contains_key(key));

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(removed, remaining = self.entries.len(), "Cleaned up expired posts");
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared post cache");
    }

    /// Get number of cached posts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `key` to the most recently used position.
    fn touch(&mut self, key: &str) {
        self.forget(key);
        self.access_order.push(key.to_string());
    }

    fn forget(&mut self, key: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    /// Evict least recently used entry.
    fn evict_lru(&mut self) {
        if !self.access_order.is_empty() {
            let key = self.access_order.remove(0);
            tracing::debug!(post_id = %key, "Evicting LRU entry");
            self.entries.remove(&key);
        }
    }
}

impl Default for PostCache {
    fn default() -> Self {
        Self::new(PostCacheConfig::default())
    }
}

/// A [`PostCache`] shared between the posts view and the boost dialog.
#[derive(Debug, Clone, Default)]
pub struct SharedPostCache {
    inner: Arc<Mutex<PostCache>>,
}

impl SharedPostCache {
    /// Wrap a new cache.
    pub fn new(config: PostCacheConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PostCache::new(config))),
        }
    }

    /// Insert every post of a listing.
    pub fn store_report(&self, report: &PostsReport) {
        self.inner.lock().store_report(report);
    }

    /// Cloned summary of a live entry.
    pub fn lookup(&self, post_id: &str) -> Option<PostPerformance> {
        self.inner.lock().get(post_id).map(|entry| entry.post().clone())
    }

    /// Listing rebuilt from every live entry, for offline display.
    pub fn snapshot(&self) -> PostsReport {
        let posts = self.inner.lock().posts().into_iter().cloned().collect();
        PostsReport::new(posts)
    }

    /// Number of cached posts, expired ones included until cleanup.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
