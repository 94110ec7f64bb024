mod common;

use common::TestBackend;
use payline::application::subscriptions::SubscriptionMaintenance;

const ENDPOINT: &str = "https://app.payline.example/processor/events";

fn maintenance(backend: &TestBackend) -> SubscriptionMaintenance {
    SubscriptionMaintenance::new(
        Box::new(backend.processor.clone()),
        ENDPOINT.to_string(),
        "whsec-test".to_string(),
    )
}

#[tokio::test]
async fn test_registers_endpoint_when_absent() {
    let backend = TestBackend::new();

    let location = maintenance(&backend).ensure_endpoint().await.unwrap();

    let subscriptions = backend.processor.subscriptions().await;
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].location, location);
    assert_eq!(subscriptions[0].url, ENDPOINT);
}

#[tokio::test]
async fn test_removes_foreign_endpoints() {
    let backend = TestBackend::new();
    backend
        .processor
        .seed_subscription("https://old.example/hooks", false)
        .await;
    let ours = backend.processor.seed_subscription(ENDPOINT, false).await;

    let location = maintenance(&backend).ensure_endpoint().await.unwrap();
    assert_eq!(location, ours);

    let subscriptions = backend.processor.subscriptions().await;
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].url, ENDPOINT);
}

#[tokio::test]
async fn test_unpauses_matching_endpoint() {
    let backend = TestBackend::new();
    backend.processor.seed_subscription(ENDPOINT, true).await;

    maintenance(&backend).ensure_endpoint().await.unwrap();

    let subscriptions = backend.processor.subscriptions().await;
    assert_eq!(subscriptions.len(), 1);
    assert!(!subscriptions[0].paused);
}
