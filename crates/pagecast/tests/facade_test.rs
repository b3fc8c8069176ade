use pagecast::{
    ApiConfig, BoostWorkflow, BoostState, EventBus, HttpConsoleApi, MemoryTokenStore,
    PagecastErrorKind, PublishCoordinator, SharedPostCache,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpConsoleApi {
    HttpConsoleApi::new(
        ApiConfig::new(format!("{}/api", server.uri())),
        Arc::new(MemoryTokenStore::with_token("tok")),
    )
    .unwrap()
}

#[tokio::test]
async fn publish_over_http_resets_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/facebook/publish/multi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": {
                "p1": {"success": true, "message": "Publié"},
                "p2": {"success": true, "message": "Publié"}
            },
            "summary": {"successful": 2, "failed": 0}
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut coordinator = PublishCoordinator::new(EventBus::default());
    coordinator.form_mut().set_message("Nouveautés en boutique");
    coordinator.selection_mut().select_all(["p1", "p2"]);

    let outcome = coordinator.submit(&api).await.unwrap();

    assert_eq!(outcome.successful_count(), 2);
    assert!(coordinator.selection().is_empty());
}

#[tokio::test]
async fn publish_rejection_keeps_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/facebook/publish/multi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Aucune page sélectionnée"
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut coordinator = PublishCoordinator::new(EventBus::default());
    coordinator.form_mut().set_message("Hello");
    coordinator.selection_mut().toggle("p1");

    let err = coordinator.submit(&api).await.unwrap_err();

    assert!(matches!(err.kind(), PagecastErrorKind::Submission(_)));
    assert_eq!(err.notice_text(), "Aucune page sélectionnée");
    assert_eq!(coordinator.selection().count(), 1);
}

#[tokio::test]
async fn boost_over_http_closes_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/facebook/posts/post_1/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "post": {"id": "post_1", "message": "Table en chêne"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/facebook/posts/post_1/boost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "estimated_reach": 3200
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let mut boost = BoostWorkflow::new(SharedPostCache::default(), EventBus::default());
    boost.open("post_1", &api).await.unwrap();
    boost.set_daily_budget(25.0).unwrap();

    let receipt = boost.submit(&api).await.unwrap();

    assert_eq!(receipt.estimated_reach, 3200);
    assert_eq!(boost.state(), BoostState::Closed);
}
