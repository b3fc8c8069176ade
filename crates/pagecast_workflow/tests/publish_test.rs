mod test_utils;

use pagecast_error::{ConnectionError, PagecastErrorKind, SubmissionError};
use pagecast_workflow::{
    ConsoleEvent, EventBus, NoticeBoard, NoticeLevel, ProgressConfig, PublishCoordinator,
    PublishState,
};
use std::time::Duration;
use test_utils::{MockConsoleApi, outcome};

fn filled(events: EventBus) -> PublishCoordinator {
    let mut coordinator = PublishCoordinator::with_progress(
        events,
        ProgressConfig {
            tick: Duration::from_millis(5),
            cap: 90,
        },
    );
    coordinator.form_mut().set_message("Nouvelle collection");
    coordinator.form_mut().set_link("https://boismalin.fr");
    coordinator.selection_mut().toggle("p1");
    coordinator.selection_mut().toggle("p2");
    coordinator
        .staging_mut()
        .add("table.jpg", "image/jpeg", vec![1, 2, 3]);
    coordinator
}

#[tokio::test]
async fn full_success_resets_everything() {
    let api = MockConsoleApi::new();
    let mut coordinator = filled(EventBus::default());

    let result = coordinator.submit(&api).await.unwrap();

    assert_eq!(result.successful_count(), 2);
    assert!(coordinator.selection().is_empty());
    assert!(coordinator.staging().is_empty());
    assert!(coordinator.form().message().is_empty());
    assert!(coordinator.form().link().is_empty());
    assert_eq!(*coordinator.state(), PublishState::Idle);
}

#[tokio::test]
async fn partial_failure_keeps_the_form() {
    let api = MockConsoleApi::new();
    api.queue_publish(Ok(outcome(&[("p1", true), ("p2", false)])));
    let mut coordinator = filled(EventBus::default());

    let err = coordinator.submit(&api).await.unwrap_err();

    match err.kind() {
        PagecastErrorKind::PartialOutcome(partial) => {
            assert_eq!(*partial.succeeded(), 1);
            assert_eq!(partial.failed().len(), 1);
            assert_eq!(partial.failed()[0].target_id(), "p2");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(coordinator.selection().count(), 2);
    assert_eq!(coordinator.staging().len(), 1);
    assert_eq!(coordinator.form().message(), "Nouvelle collection");
    assert!(coordinator.last_outcome().is_some());
}

#[tokio::test]
async fn unreported_page_counts_as_failure() {
    let api = MockConsoleApi::new();
    api.queue_publish(Ok(outcome(&[("p1", true)])));
    let mut coordinator = filled(EventBus::default());

    let err = coordinator.submit(&api).await.unwrap_err();

    match err.kind() {
        PagecastErrorKind::PartialOutcome(partial) => {
            assert_eq!(partial.failed()[0].target_id(), "p2");
            assert_eq!(partial.failed()[0].message(), "No result reported");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(coordinator.selection().count(), 2);
}

#[tokio::test]
async fn rejection_and_transport_failures_never_reset() {
    let api = MockConsoleApi::new();
    api.queue_publish(Err(SubmissionError::new("publish", "Token expired").into()));
    api.queue_publish(Err(ConnectionError::new("connection refused").into()));
    let mut coordinator = filled(EventBus::default());

    let first = coordinator.submit(&api).await.unwrap_err();
    assert!(matches!(first.kind(), PagecastErrorKind::Submission(_)));
    let second = coordinator.submit(&api).await.unwrap_err();
    assert!(matches!(second.kind(), PagecastErrorKind::Connection(_)));

    assert_eq!(coordinator.selection().count(), 2);
    assert_eq!(coordinator.staging().len(), 1);
    assert!(!coordinator.is_submitting());
}

#[tokio::test]
async fn rejection_after_partial_failure_clears_previous_outcome() {
    let api = MockConsoleApi::new();
    api.queue_publish(Ok(outcome(&[("p1", true), ("p2", false)])));
    api.queue_publish(Err(SubmissionError::new("publish", "Token expired").into()));
    let mut coordinator = filled(EventBus::default());

    coordinator.submit(&api).await.unwrap_err();
    assert!(coordinator.last_outcome().is_some());

    let err = coordinator.submit(&api).await.unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Submission(_)));
    assert!(coordinator.last_outcome().is_none());
    assert_eq!(coordinator.selection().count(), 2);
}

#[tokio::test]
async fn zero_tick_still_publishes() {
    let api = MockConsoleApi::new().with_publish_delay(Duration::from_millis(20));
    let mut coordinator = PublishCoordinator::with_progress(
        EventBus::default(),
        ProgressConfig {
            tick: Duration::ZERO,
            cap: 90,
        },
    );
    coordinator.form_mut().set_message("Soldes d'hiver");
    coordinator.selection_mut().toggle("p1");

    let result = coordinator.submit(&api).await.unwrap();

    assert_eq!(result.successful_count(), 1);
    assert_eq!(coordinator.progress().value(), 100.0);
}

#[tokio::test]
async fn validation_failure_sends_nothing() {
    let api = MockConsoleApi::new();
    let mut coordinator = PublishCoordinator::new(EventBus::default());
    coordinator.form_mut().set_message("   ");
    coordinator.selection_mut().toggle("p1");

    let err = coordinator.submit(&api).await.unwrap_err();

    assert!(err.as_validation().is_some());
    assert_eq!(api.call_count("publish"), 0);
    assert_eq!(*coordinator.state(), PublishState::Idle);
}

#[tokio::test]
async fn progress_is_capped_while_waiting() {
    let api = MockConsoleApi::new().with_publish_delay(Duration::from_millis(120));
    let mut coordinator = filled(EventBus::default());
    let mut watcher = coordinator.progress().watch();

    let waiting = tokio::spawn(async move {
        let mut seen = Vec::new();
        while watcher.changed().await.is_ok() {
            let value = *watcher.borrow();
            seen.push(value);
            if value >= 100.0 {
                break;
            }
        }
        seen
    });

    coordinator.submit(&api).await.unwrap();
    let seen = waiting.await.unwrap();

    let before_done: Vec<f64> = seen.iter().copied().filter(|v| *v < 100.0).collect();
    assert!(before_done.iter().all(|v| *v <= 90.0));
    assert!(before_done.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(coordinator.progress().value(), 100.0);
}

#[tokio::test]
async fn outcomes_reach_the_notice_board() {
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let api = MockConsoleApi::new();
    api.queue_publish(Ok(outcome(&[("p1", true), ("p2", false)])));
    let mut coordinator = filled(events);

    let _ = coordinator.submit(&api).await;
    let mut board = NoticeBoard::default();
    board.pump(&mut rx);

    let last = board.notices().last().unwrap();
    assert_eq!(*last.level(), NoticeLevel::Error);
    assert_eq!(last.text(), "Published to 1 page(s), 1 failed");
}

#[test]
fn stale_token_after_new_submission_is_ignored() {
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let mut coordinator = filled(events);

    let first = coordinator.begin_submit().unwrap();
    coordinator.abandon();
    let second = coordinator.begin_submit().unwrap();

    let ignored = coordinator
        .complete(*first.token(), Ok(outcome(&[("p1", true), ("p2", true)])))
        .unwrap();
    assert!(ignored.is_none());
    assert!(coordinator.is_submitting());

    coordinator
        .complete(*second.token(), Ok(outcome(&[("p1", true), ("p2", true)])))
        .unwrap();
    assert!(coordinator.selection().is_empty());

    let mut saw_selection_reset = false;
    while let Ok(event) = rx.try_recv() {
        if event == ConsoleEvent::SelectionChanged(0) {
            saw_selection_reset = true;
        }
    }
    assert!(saw_selection_reset);
}
