mod test_utils;

use pagecast_cache::SharedPostCache;
use pagecast_core::{PostPerformance, PostsReport};
use pagecast_error::{AuthError, ConnectionError, PagecastErrorKind};
use pagecast_workflow::{EventBus, FallbackPolicy, PostsFeed};
use test_utils::MockConsoleApi;

fn listing() -> PostsReport {
    PostsReport::new(vec![
        PostPerformance::new("post_1", "p1", "Bois Malin", "Table").with_metrics(900, 10, 2, 1),
        PostPerformance::new("post_2", "p2", "Bois Grand Ouest", "Chaise")
            .with_metrics(300, 4, 0, 0),
    ])
}

#[tokio::test]
async fn fresh_listing_fills_cache() {
    let api = MockConsoleApi::new();
    api.queue_posts(Ok(listing()));
    let feed = PostsFeed::new(SharedPostCache::default(), EventBus::default());

    let fetch = feed.refresh(&api).await.unwrap();

    assert!(!*fetch.stale());
    assert_eq!(fetch.report().posts.len(), 2);
    assert_eq!(feed.cache().len(), 2);
}

#[tokio::test]
async fn disabled_policy_reports_the_error() {
    let api = MockConsoleApi::new();
    api.queue_posts(Ok(listing()));
    api.queue_posts(Err(ConnectionError::new("refused").into()));
    let feed = PostsFeed::new(SharedPostCache::default(), EventBus::default());

    feed.refresh(&api).await.unwrap();
    let err = feed.refresh(&api).await.unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Connection(_)));
}

#[tokio::test]
async fn cached_policy_serves_stale_posts() {
    let api = MockConsoleApi::new();
    api.queue_posts(Ok(listing()));
    api.queue_posts(Err(ConnectionError::new("refused").into()));
    let feed = PostsFeed::new(SharedPostCache::default(), EventBus::default())
        .with_policy(FallbackPolicy::CachedPosts);

    feed.refresh(&api).await.unwrap();
    let fetch = feed.refresh(&api).await.unwrap();

    assert!(*fetch.stale());
    assert_eq!(fetch.report().posts.len(), 2);
}

#[tokio::test]
async fn cached_policy_never_invents_posts() {
    let api = MockConsoleApi::new();
    api.queue_posts(Err(ConnectionError::new("refused").into()));
    let feed = PostsFeed::new(SharedPostCache::default(), EventBus::default())
        .with_policy(FallbackPolicy::CachedPosts);

    assert!(feed.refresh(&api).await.is_err());
}

#[test]
fn session_errors_are_not_masked() {
    let feed = PostsFeed::new(SharedPostCache::default(), EventBus::default())
        .with_policy(FallbackPolicy::from_enabled(true));
    feed.accept(Ok(listing())).unwrap();

    let err = feed.accept(Err(AuthError::new("401").into())).unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Auth(_)));
}
