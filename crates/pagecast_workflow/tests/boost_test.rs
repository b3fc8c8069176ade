mod test_utils;

use pagecast_cache::SharedPostCache;
use pagecast_core::{AudienceMode, Objective, PostPerformance, PostsReport};
use pagecast_error::{ConnectionError, PagecastErrorKind, SubmissionError, ValidationErrorKind};
use pagecast_workflow::{BoostState, BoostWorkflow, ConsoleEvent, EventBus, PreviewSource};
use test_utils::MockConsoleApi;

fn workflow() -> BoostWorkflow {
    BoostWorkflow::new(SharedPostCache::default(), EventBus::default())
}

#[tokio::test]
async fn open_uses_live_details() {
    let api = MockConsoleApi::new();
    let mut boost = workflow();

    let preview = boost.open("post_1", &api).await.unwrap();

    assert_eq!(*preview.source(), PreviewSource::Live);
    assert_eq!(boost.state(), BoostState::PreviewLoaded);
    assert_eq!(*boost.form().objective(), Objective::Reach);
    assert_eq!(*boost.form().daily_budget(), 20.0);
    assert_eq!(*boost.form().duration_days(), 7);
    assert_eq!(*boost.form().audience_mode(), AudienceMode::Auto);
}

#[tokio::test]
async fn open_falls_back_to_cached_summary() {
    let cache = SharedPostCache::default();
    cache.store_report(&PostsReport::new(vec![
        PostPerformance::new("post_1", "p1", "Bois Malin", "Table en chêne")
            .with_metrics(1200, 40, 5, 3),
    ]));
    let api = MockConsoleApi::new();
    api.queue_post_details(Err(ConnectionError::new("timed out").into()));
    let mut boost = BoostWorkflow::new(cache, EventBus::default());

    let preview = boost.open("post_1", &api).await.unwrap();

    assert_eq!(*preview.source(), PreviewSource::Cached);
    let details = preview.details().as_ref().unwrap();
    assert_eq!(details.message(), "Table en chêne");
    assert!(*details.from_cache());
}

#[tokio::test]
async fn saved_mode_requires_an_audience() {
    let api = MockConsoleApi::new();
    let mut boost = workflow();
    boost.open("post_1", &api).await.unwrap();
    boost.set_audience_mode(AudienceMode::Saved).unwrap();

    let err = boost.submit(&api).await.unwrap_err();

    assert_eq!(
        err.as_validation().map(|e| e.kind().clone()),
        Some(ValidationErrorKind::IncompleteBoostForm(
            "select a saved audience".to_string()
        ))
    );
    assert_eq!(boost.state(), BoostState::FormEditing);
    assert_eq!(api.call_count("boost"), 0);

    boost.set_saved_audience("aud_42").unwrap();
    boost.set_daily_budget(15.0).unwrap();
    boost.set_duration_days(3).unwrap();
    let receipt = boost.submit(&api).await.unwrap();

    assert_eq!(receipt.estimated_reach, 2500);
    assert_eq!(boost.state(), BoostState::Closed);
    let sent = &api.boosts()[0];
    assert_eq!(sent.post_id(), "post_1");
    assert_eq!(sent.saved_audience_id().as_deref(), Some("aud_42"));
    assert!(sent.targeting().is_none());
}

#[tokio::test]
async fn success_requests_post_refresh() {
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let api = MockConsoleApi::new();
    let mut boost = BoostWorkflow::new(SharedPostCache::default(), events);
    boost.open("post_1", &api).await.unwrap();

    boost.submit(&api).await.unwrap();

    let mut refreshed = false;
    while let Ok(event) = rx.try_recv() {
        refreshed |= event == ConsoleEvent::PostsRefreshRequested;
    }
    assert!(refreshed);
}

#[tokio::test]
async fn failure_keeps_the_form() {
    let api = MockConsoleApi::new();
    api.queue_boost(Err(SubmissionError::new("boost", "Ad account disabled").into()));
    let mut boost = workflow();
    boost.open("post_1", &api).await.unwrap();
    boost.set_daily_budget(30.0).unwrap();

    let err = boost.submit(&api).await.unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Submission(_)));
    assert_eq!(err.notice_text(), "Ad account disabled");
    assert_eq!(boost.state(), BoostState::FormEditing);
    assert_eq!(*boost.form().daily_budget(), 30.0);
    assert!(boost.preview().is_some());
}

#[test]
fn response_after_close_is_ignored() {
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let mut boost = BoostWorkflow::new(SharedPostCache::default(), events);
    boost
        .load_preview("post_1", Ok(pagecast_interface::PostDetails::new("post_1", "Hi")))
        .unwrap();

    let pending = boost.begin_submit().unwrap();
    assert_eq!(boost.state(), BoostState::Submitting);
    boost.close();

    let applied = boost
        .complete(
            *pending.token(),
            Ok(pagecast_core::BoostReceipt {
                estimated_reach: 10,
            }),
        )
        .unwrap();

    assert!(applied.is_none());
    assert_eq!(boost.state(), BoostState::Closed);
    assert!(rx.try_recv().is_err());
}

#[test]
fn response_for_previous_opening_is_ignored() {
    let mut boost = workflow();
    boost
        .load_preview("post_1", Ok(pagecast_interface::PostDetails::new("post_1", "Hi")))
        .unwrap();
    let stale = boost.begin_submit().unwrap();
    boost.close();
    boost
        .load_preview("post_2", Ok(pagecast_interface::PostDetails::new("post_2", "Yo")))
        .unwrap();

    let applied = boost
        .complete(*stale.token(), Ok(Default::default()))
        .unwrap();

    assert!(applied.is_none());
    assert_eq!(boost.state(), BoostState::PreviewLoaded);
    assert_eq!(boost.preview().unwrap().post_id(), "post_2");
}

#[test]
fn double_submit_is_rejected() {
    let mut boost = workflow();
    boost
        .load_preview("post_1", Ok(pagecast_interface::PostDetails::new("post_1", "Hi")))
        .unwrap();
    boost.begin_submit().unwrap();
    let err = boost.begin_submit().unwrap_err();
    assert!(matches!(err.kind(), PagecastErrorKind::Workflow(_)));
}
