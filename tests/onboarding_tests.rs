mod common;

use common::{company_request, owner_request, TestBackend};
use payline::domain::context::RequestContext;
use payline::domain::ports::CompanyStore;
use payline::domain::processor::ProcessorError;
use payline::domain::status::CustomerStatus;
use payline::error::Error;
use uuid::Uuid;

#[tokio::test]
async fn test_create_company_persists_processor_uri_and_status() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let company = service.create_company(&ctx, &company_request()).await.unwrap();

    assert!(company.processor_uri.starts_with("https://api.processor.test/customers/"));
    assert_eq!(company.status, CustomerStatus::Unverified);
    assert_eq!(
        backend.companies.get(ctx.tenant_id()).await.unwrap().unwrap(),
        company
    );
}

#[tokio::test]
async fn test_create_company_twice_conflicts() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    service.create_company(&ctx, &company_request()).await.unwrap();
    let err = service
        .create_company(&ctx, &company_request())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn test_create_company_rejects_placeholder_ssn() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let mut request = company_request();
    request.controller.ssn = "000-00-0000".to_string();

    let err = service.create_company(&ctx, &request).await.unwrap_err();
    match err {
        Error::Validation(fields) => {
            assert!(fields.iter().any(|f| f.field == "controller.ssn"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    // Nothing was submitted or persisted.
    assert!(backend.companies.get(ctx.tenant_id()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_reader_cannot_create_company() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin_reader(Uuid::new_v4());

    let err = service
        .create_company(&ctx, &company_request())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotAcceptable(_)));
}

#[tokio::test]
async fn test_update_rejected_outside_verified_and_unverified() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .set_verification_status(CustomerStatus::Suspended)
        .await;
    service.create_company(&ctx, &company_request()).await.unwrap();

    let err = service
        .update_company(&ctx, &company_request())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotAcceptable(_)));
}

#[tokio::test]
async fn test_update_while_verified_keeps_identity_fields() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .set_verification_status(CustomerStatus::Verified)
        .await;
    service.create_company(&ctx, &company_request()).await.unwrap();

    let mut update = company_request();
    update.first_name = "Imposter".to_string();
    update.email = "new-billing@lindworks.example".to_string();
    update.city = "Seattle".to_string();

    let company = service.update_company(&ctx, &update).await.unwrap();
    assert_eq!(company.email, "new-billing@lindworks.example");
    assert_eq!(company.city, "Seattle");
    // Identity is locked once verified.
    assert_eq!(company.first_name, "Avery");
}

#[tokio::test]
async fn test_update_while_unverified_corrects_identity_only() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    service.create_company(&ctx, &company_request()).await.unwrap();

    let mut update = company_request();
    update.last_name = "Lind-Moore".to_string();
    update.city = "Seattle".to_string();

    let company = service.update_company(&ctx, &update).await.unwrap();
    assert_eq!(company.last_name, "Lind-Moore");
    // Address corrections go through the full resubmission path instead.
    assert_eq!(company.city, "Tacoma");
}

#[tokio::test]
async fn test_retry_from_verified_is_rejected() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .set_verification_status(CustomerStatus::Verified)
        .await;
    service.create_company(&ctx, &company_request()).await.unwrap();

    let err = service
        .retry_company(&ctx, &company_request())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotAcceptable(_)));
}

#[tokio::test]
async fn test_retry_from_retry_resubmits_and_reads_back_status() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .set_verification_status(CustomerStatus::Retry)
        .await;
    service.create_company(&ctx, &company_request()).await.unwrap();

    backend
        .processor
        .set_verification_status(CustomerStatus::Verified)
        .await;
    let mut corrected = company_request();
    corrected.address1 = "401 Dock St".to_string();

    let company = service.retry_company(&ctx, &corrected).await.unwrap();
    assert_eq!(company.status, CustomerStatus::Verified);
    assert_eq!(company.address1, "401 Dock St");
}

#[tokio::test]
async fn test_retry_from_document_required_succeeds() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .set_verification_status(CustomerStatus::Document)
        .await;
    service.create_company(&ctx, &company_request()).await.unwrap();

    assert!(service.retry_company(&ctx, &company_request()).await.is_ok());
}

#[tokio::test]
async fn test_processor_rejection_echoes_field_complaints() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .fail_next(ProcessorError::invalid_field(
            "businessClassification",
            "unknown classification",
        ))
        .await;

    let err = service
        .create_company(&ctx, &company_request())
        .await
        .unwrap_err();
    match err {
        Error::Validation(fields) => {
            assert_eq!(fields[0].field, "businessClassification");
            assert_eq!(fields[0].message, "unknown classification");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_owner_crud_round_trip() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    service.create_company(&ctx, &company_request()).await.unwrap();

    let owner = service.add_owner(&ctx, &owner_request()).await.unwrap();
    assert_eq!(service.list_owners(&ctx).await.unwrap().len(), 1);

    let mut edit = owner_request();
    edit.identity.title = "COO".to_string();
    let edited = service.edit_owner(&ctx, owner.id, &edit).await.unwrap();
    assert_eq!(edited.title, "COO");

    service.delete_owner(&ctx, owner.id).await.unwrap();
    assert!(service.list_owners(&ctx).await.unwrap().is_empty());
    assert_eq!(backend.processor.removed_owners().await.len(), 1);
}

#[tokio::test]
async fn test_owner_operations_require_company() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    let err = service.add_owner(&ctx, &owner_request()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_owner_edits_blocked_after_verification() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    backend
        .processor
        .set_verification_status(CustomerStatus::Verified)
        .await;
    service.create_company(&ctx, &company_request()).await.unwrap();

    let err = service.add_owner(&ctx, &owner_request()).await.unwrap_err();
    assert!(matches!(err, Error::NotAcceptable(_)));
}

#[tokio::test]
async fn test_link_funding_source_stores_location() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    service.create_company(&ctx, &company_request()).await.unwrap();

    let request = payline::domain::processor::FundingSourceRequest {
        routing_number: "222222226".to_string(),
        account_number: "0123456789".to_string(),
        bank_account_type: "checking".to_string(),
        name: "Operating".to_string(),
    };
    let company = service.link_funding_source(&ctx, &request).await.unwrap();
    assert!(company
        .funding_source_uri
        .unwrap()
        .starts_with("https://api.processor.test/funding-sources/"));
}

#[tokio::test]
async fn test_unlink_funding_source_clears_location() {
    let backend = TestBackend::new();
    let service = backend.onboarding();
    let ctx = RequestContext::admin(Uuid::new_v4());

    service.create_company(&ctx, &company_request()).await.unwrap();
    let request = payline::domain::processor::FundingSourceRequest {
        routing_number: "222222226".to_string(),
        account_number: "0123456789".to_string(),
        bank_account_type: "checking".to_string(),
        name: "Operating".to_string(),
    };
    service.link_funding_source(&ctx, &request).await.unwrap();

    let company = service.unlink_funding_source(&ctx).await.unwrap();
    assert!(company.funding_source_uri.is_none());

    // A second unlink has nothing to remove.
    let err = service.unlink_funding_source(&ctx).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
