use crate::domain::company::{CompanyRequest, CustomerPatch};
use crate::domain::owner::OwnerIdentity;
use crate::domain::status::{CustomerStatus, DocumentType};
use crate::error::{Error, FieldError};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;
pub type ProcessorClientBox = Box<dyn ProcessorClient>;

/// A rejection surfaced by the processor. Field-level complaints are kept so
/// callers can see why the external system refused their data.
#[derive(Debug, Clone)]
pub struct ProcessorError {
    pub code: String,
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl ProcessorError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "ServerError".to_string(),
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let message = message.into();
        Self {
            code: "ValidationError".to_string(),
            message: message.clone(),
            field_errors: vec![FieldError::new(field, message)],
        }
    }
}

impl fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProcessorError {}

/// Processor rejections with field detail become local validation errors so
/// the caller can correct the request; faults without detail stay internal.
impl From<ProcessorError> for Error {
    fn from(err: ProcessorError) -> Self {
        if err.field_errors.is_empty() {
            Error::Internal(err.message)
        } else {
            Error::Validation(err.field_errors)
        }
    }
}

/// Full business-customer submission, used both for creation and for
/// retry resubmission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doing_business_as: Option<String>,
    pub business_type: String,
    pub business_classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub controller: OwnerIdentity,
}

impl From<&CompanyRequest> for CustomerPayload {
    fn from(req: &CompanyRequest) -> Self {
        Self {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            date_of_birth: req.date_of_birth.clone(),
            ssn: req.ssn.clone(),
            address1: req.address1.clone(),
            address2: req.address2.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            postal_code: req.postal_code.clone(),
            country: req.country.clone(),
            business_name: req.business_name.clone(),
            doing_business_as: req.doing_business_as.clone(),
            business_type: req.business_type.clone(),
            business_classification: req.business_classification.clone(),
            ein: req.ein.clone(),
            website: req.website.clone(),
            controller: req.controller.clone(),
        }
    }
}

/// Customer record as read back from the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub location: String,
    pub status: CustomerStatus,
}

/// Beneficial-owner record as read back from the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub location: String,
    pub status: CustomerStatus,
}

/// Document record as read back from the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorDocument {
    pub location: String,
    pub doc_type: DocumentType,
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSubscription {
    pub location: String,
    pub url: String,
    pub paused: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceRequest {
    pub routing_number: String,
    pub account_number: String,
    pub bank_account_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source: String,
    pub destination: String,
    pub amount: Decimal,
    pub currency: String,
}

/// The external payments processor, treated as an opaque RPC dependency.
/// Every created resource is keyed by the processor-assigned location URI.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    async fn create_customer(&self, payload: &CustomerPayload) -> ProcessorResult<String>;
    async fn get_customer(&self, location: &str) -> ProcessorResult<CustomerRecord>;
    async fn update_customer(&self, location: &str, patch: &CustomerPatch) -> ProcessorResult<()>;
    /// Full-payload resubmission used by the retry path.
    async fn resubmit_customer(
        &self,
        location: &str,
        payload: &CustomerPayload,
    ) -> ProcessorResult<()>;

    async fn create_owner(
        &self,
        customer_location: &str,
        owner: &OwnerIdentity,
    ) -> ProcessorResult<String>;
    async fn get_owner(&self, location: &str) -> ProcessorResult<OwnerRecord>;
    async fn update_owner(&self, location: &str, owner: &OwnerIdentity) -> ProcessorResult<()>;
    async fn remove_owner(&self, location: &str) -> ProcessorResult<()>;

    async fn create_funding_source(
        &self,
        customer_location: &str,
        request: &FundingSourceRequest,
    ) -> ProcessorResult<String>;
    async fn remove_funding_source(&self, location: &str) -> ProcessorResult<()>;

    async fn create_transfer(&self, request: &TransferRequest) -> ProcessorResult<String>;
    async fn cancel_transfer(&self, location: &str) -> ProcessorResult<bool>;

    async fn create_document(
        &self,
        customer_location: &str,
        file_name: &str,
        doc_type: DocumentType,
        bytes: &[u8],
    ) -> ProcessorResult<String>;
    async fn get_document(&self, location: &str) -> ProcessorResult<ProcessorDocument>;
    async fn list_documents(
        &self,
        customer_location: &str,
    ) -> ProcessorResult<Vec<ProcessorDocument>>;

    async fn register_webhook_subscription(
        &self,
        url: &str,
        secret: &str,
    ) -> ProcessorResult<String>;
    async fn list_webhook_subscriptions(&self) -> ProcessorResult<Vec<WebhookSubscription>>;
    async fn delete_webhook_subscription(&self, location: &str) -> ProcessorResult<()>;
    async fn unpause_webhook_subscription(&self, location: &str) -> ProcessorResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rejection_becomes_validation_error() {
        let err = ProcessorError::invalid_field("controller.ssn", "invalid SSN");
        match Error::from(err) {
            Error::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "controller.ssn");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_fault_without_detail_stays_internal() {
        let err = ProcessorError::internal("upstream timeout");
        assert!(matches!(Error::from(err), Error::Internal(_)));
    }
}
