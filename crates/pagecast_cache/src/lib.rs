//! Post summary caching with TTL support.
//!
//! Every post-performance listing refreshes the cache; the boost dialog falls
//! back to it when the detailed post lookup fails.

#![warn(missing_docs)]

mod cache;

pub use cache::{
    CacheEntry, PostCache, PostCacheConfig, PostCacheConfigBuilder, SharedPostCache,
};
