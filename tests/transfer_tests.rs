mod common;

use common::TestBackend;
use payline::application::webhook::WebhookOutcome;
use payline::domain::context::RequestContext;
use payline::domain::event::{EventTopic, WebhookEvent};
use payline::domain::status::TransferStatus;
use payline::error::Error;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn test_initiate_persists_pending_transfer() {
    let backend = TestBackend::new();
    let service = backend.transfer_service();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let transfer = service
        .initiate(
            &ctx,
            Uuid::new_v4(),
            dec!(320.00),
            "https://api.processor.test/funding-sources/src",
            "https://api.processor.test/funding-sources/dst",
        )
        .await
        .unwrap();

    assert_eq!(transfer.status, TransferStatus::Pending);
    assert!(transfer
        .external_id
        .starts_with("https://api.processor.test/transfers/"));
}

#[tokio::test]
async fn test_initiate_rejects_non_positive_amount() {
    let backend = TestBackend::new();
    let service = backend.transfer_service();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let err = service
        .initiate(&ctx, Uuid::new_v4(), dec!(0), "src", "dst")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_cancel_asks_processor_but_does_not_flip_status() {
    let backend = TestBackend::new();
    let service = backend.transfer_service();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let transfer = service
        .initiate(&ctx, Uuid::new_v4(), dec!(10.00), "src", "dst")
        .await
        .unwrap();
    service.cancel(&ctx, transfer.id).await.unwrap();

    assert_eq!(
        backend.processor.cancelled_transfers().await,
        vec![transfer.external_id.clone()]
    );
    // The record stays pending until the cancellation webhook arrives.
    let stored = service.get(&ctx, transfer.id).await.unwrap();
    assert_eq!(stored.status, TransferStatus::Pending);

    let webhooks = backend.webhooks();
    let event = WebhookEvent::new(EventTopic::TransferCancelled, &transfer.external_id);
    assert_eq!(webhooks.process(&event).await, WebhookOutcome::Processed);
    let stored = service.get(&ctx, transfer.id).await.unwrap();
    assert_eq!(stored.status, TransferStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_terminal_transfer_rejected() {
    let backend = TestBackend::new();
    let service = backend.transfer_service();
    let webhooks = backend.webhooks();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let transfer = service
        .initiate(&ctx, Uuid::new_v4(), dec!(10.00), "src", "dst")
        .await
        .unwrap();
    let event = WebhookEvent::new(EventTopic::TransferCompleted, &transfer.external_id);
    webhooks.process(&event).await;

    let err = service.cancel(&ctx, transfer.id).await.unwrap_err();
    assert!(matches!(err, Error::NotAcceptable(_)));
}
