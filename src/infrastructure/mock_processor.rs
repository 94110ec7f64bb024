use crate::domain::company::CustomerPatch;
use crate::domain::owner::OwnerIdentity;
use crate::domain::processor::{
    CustomerPayload, CustomerRecord, FundingSourceRequest, OwnerRecord, ProcessorClient,
    ProcessorDocument, ProcessorError, ProcessorResult, TransferRequest, WebhookSubscription,
};
use crate::domain::status::{CustomerStatus, DocumentType};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const BASE: &str = "https://api.processor.test";

/// Stand-in for the external processor used by tests and the demo binary.
///
/// Customer verification outcomes are configurable: newly created or
/// resubmitted customers take whatever status the mock is currently set to,
/// and the next call can be made to fail with a processor-style rejection.
#[derive(Default, Clone)]
pub struct MockProcessorClient {
    state: Arc<RwLock<MockState>>,
}

struct MockState {
    customers: HashMap<String, CustomerStatus>,
    owners: HashMap<String, CustomerStatus>,
    documents: HashMap<String, ProcessorDocument>,
    subscriptions: HashMap<String, WebhookSubscription>,
    cancelled_transfers: Vec<String>,
    removed_owners: Vec<String>,
    verification_status: CustomerStatus,
    document_failure: Option<String>,
    fail_next: Option<ProcessorError>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            customers: HashMap::new(),
            owners: HashMap::new(),
            documents: HashMap::new(),
            subscriptions: HashMap::new(),
            cancelled_transfers: Vec::new(),
            removed_owners: Vec::new(),
            verification_status: CustomerStatus::Unverified,
            document_failure: None,
            fail_next: None,
        }
    }
}

impl MockProcessorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status assigned to the next created or resubmitted customer/owner.
    pub async fn set_verification_status(&self, status: CustomerStatus) {
        self.state.write().await.verification_status = status;
    }

    /// Makes the next processor call fail with the given rejection.
    pub async fn fail_next(&self, err: ProcessorError) {
        self.state.write().await.fail_next = Some(err);
    }

    /// Failure reason reported for subsequently created documents.
    pub async fn set_document_failure(&self, reason: Option<String>) {
        self.state.write().await.document_failure = reason;
    }

    pub async fn seed_subscription(&self, url: &str, paused: bool) -> String {
        let location = format!("{BASE}/webhook-subscriptions/{}", Uuid::new_v4());
        self.state.write().await.subscriptions.insert(
            location.clone(),
            WebhookSubscription {
                location: location.clone(),
                url: url.to_string(),
                paused,
            },
        );
        location
    }

    pub async fn cancelled_transfers(&self) -> Vec<String> {
        self.state.read().await.cancelled_transfers.clone()
    }

    pub async fn removed_owners(&self) -> Vec<String> {
        self.state.read().await.removed_owners.clone()
    }

    pub async fn subscriptions(&self) -> Vec<WebhookSubscription> {
        self.state
            .read()
            .await
            .subscriptions
            .values()
            .cloned()
            .collect()
    }

    async fn take_failure(&self) -> ProcessorResult<()> {
        if let Some(err) = self.state.write().await.fail_next.take() {
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl ProcessorClient for MockProcessorClient {
    async fn create_customer(&self, _payload: &CustomerPayload) -> ProcessorResult<String> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        let location = format!("{BASE}/customers/{}", Uuid::new_v4());
        let status = state.verification_status;
        state.customers.insert(location.clone(), status);
        Ok(location)
    }

    async fn get_customer(&self, location: &str) -> ProcessorResult<CustomerRecord> {
        self.take_failure().await?;
        let state = self.state.read().await;
        let status = state
            .customers
            .get(location)
            .copied()
            .ok_or_else(|| ProcessorError::internal(format!("unknown customer {location}")))?;
        Ok(CustomerRecord {
            location: location.to_string(),
            status,
        })
    }

    async fn update_customer(&self, location: &str, _patch: &CustomerPatch) -> ProcessorResult<()> {
        self.take_failure().await?;
        let state = self.state.read().await;
        if !state.customers.contains_key(location) {
            return Err(ProcessorError::internal(format!(
                "unknown customer {location}"
            )));
        }
        Ok(())
    }

    async fn resubmit_customer(
        &self,
        location: &str,
        _payload: &CustomerPayload,
    ) -> ProcessorResult<()> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        let status = state.verification_status;
        match state.customers.get_mut(location) {
            Some(existing) => {
                *existing = status;
                Ok(())
            }
            None => Err(ProcessorError::internal(format!(
                "unknown customer {location}"
            ))),
        }
    }

    async fn create_owner(
        &self,
        _customer_location: &str,
        _owner: &OwnerIdentity,
    ) -> ProcessorResult<String> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        let location = format!("{BASE}/beneficial-owners/{}", Uuid::new_v4());
        let status = state.verification_status;
        state.owners.insert(location.clone(), status);
        Ok(location)
    }

    async fn get_owner(&self, location: &str) -> ProcessorResult<OwnerRecord> {
        self.take_failure().await?;
        let state = self.state.read().await;
        let status = state
            .owners
            .get(location)
            .copied()
            .ok_or_else(|| ProcessorError::internal(format!("unknown owner {location}")))?;
        Ok(OwnerRecord {
            location: location.to_string(),
            status,
        })
    }

    async fn update_owner(&self, location: &str, _owner: &OwnerIdentity) -> ProcessorResult<()> {
        self.take_failure().await?;
        let state = self.state.read().await;
        if !state.owners.contains_key(location) {
            return Err(ProcessorError::internal(format!("unknown owner {location}")));
        }
        Ok(())
    }

    async fn remove_owner(&self, location: &str) -> ProcessorResult<()> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        state.owners.remove(location);
        state.removed_owners.push(location.to_string());
        Ok(())
    }

    async fn create_funding_source(
        &self,
        _customer_location: &str,
        _request: &FundingSourceRequest,
    ) -> ProcessorResult<String> {
        self.take_failure().await?;
        Ok(format!("{BASE}/funding-sources/{}", Uuid::new_v4()))
    }

    async fn remove_funding_source(&self, _location: &str) -> ProcessorResult<()> {
        self.take_failure().await?;
        Ok(())
    }

    async fn create_transfer(&self, _request: &TransferRequest) -> ProcessorResult<String> {
        self.take_failure().await?;
        Ok(format!("{BASE}/transfers/{}", Uuid::new_v4()))
    }

    async fn cancel_transfer(&self, location: &str) -> ProcessorResult<bool> {
        self.take_failure().await?;
        self.state
            .write()
            .await
            .cancelled_transfers
            .push(location.to_string());
        Ok(true)
    }

    async fn create_document(
        &self,
        _customer_location: &str,
        _file_name: &str,
        doc_type: DocumentType,
        _bytes: &[u8],
    ) -> ProcessorResult<String> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        let location = format!("{BASE}/documents/{}", Uuid::new_v4());
        let document = ProcessorDocument {
            location: location.clone(),
            doc_type,
            failure_reason: state.document_failure.clone(),
        };
        state.documents.insert(location.clone(), document);
        Ok(location)
    }

    async fn get_document(&self, location: &str) -> ProcessorResult<ProcessorDocument> {
        self.take_failure().await?;
        let state = self.state.read().await;
        state
            .documents
            .get(location)
            .cloned()
            .ok_or_else(|| ProcessorError::internal(format!("unknown document {location}")))
    }

    async fn list_documents(
        &self,
        _customer_location: &str,
    ) -> ProcessorResult<Vec<ProcessorDocument>> {
        self.take_failure().await?;
        Ok(self.state.read().await.documents.values().cloned().collect())
    }

    async fn register_webhook_subscription(
        &self,
        url: &str,
        _secret: &str,
    ) -> ProcessorResult<String> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        let location = format!("{BASE}/webhook-subscriptions/{}", Uuid::new_v4());
        state.subscriptions.insert(
            location.clone(),
            WebhookSubscription {
                location: location.clone(),
                url: url.to_string(),
                paused: false,
            },
        );
        Ok(location)
    }

    async fn list_webhook_subscriptions(&self) -> ProcessorResult<Vec<WebhookSubscription>> {
        self.take_failure().await?;
        Ok(self
            .state
            .read()
            .await
            .subscriptions
            .values()
            .cloned()
            .collect())
    }

    async fn delete_webhook_subscription(&self, location: &str) -> ProcessorResult<()> {
        self.take_failure().await?;
        self.state.write().await.subscriptions.remove(location);
        Ok(())
    }

    async fn unpause_webhook_subscription(&self, location: &str) -> ProcessorResult<()> {
        self.take_failure().await?;
        let mut state = self.state.write().await;
        match state.subscriptions.get_mut(location) {
            Some(subscription) => {
                subscription.paused = false;
                Ok(())
            }
            None => Err(ProcessorError::internal(format!(
                "unknown subscription {location}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = MockState::default();
        assert_eq!(state.verification_status, CustomerStatus::Unverified);
        assert!(state.fail_next.is_none());
    }

    #[tokio::test]
    async fn test_fail_next_consumed_once() {
        let client = MockProcessorClient::new();
        client
            .fail_next(ProcessorError::invalid_field("email", "invalid"))
            .await;

        let payload_err = client
            .create_transfer(&TransferRequest {
                source: "s".to_string(),
                destination: "d".to_string(),
                amount: rust_decimal::Decimal::ONE,
                currency: "USD".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(payload_err.code, "ValidationError");

        // The failure is consumed; the next call succeeds.
        assert!(client
            .create_transfer(&TransferRequest {
                source: "s".to_string(),
                destination: "d".to_string(),
                amount: rust_decimal::Decimal::ONE,
                currency: "USD".to_string(),
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_resubmission_takes_configured_status() {
        let client = MockProcessorClient::new();
        client
            .set_verification_status(CustomerStatus::Retry)
            .await;
        let location = client
            .create_customer(&sample_payload())
            .await
            .unwrap();

        client
            .set_verification_status(CustomerStatus::Verified)
            .await;
        client
            .resubmit_customer(&location, &sample_payload())
            .await
            .unwrap();

        let record = client.get_customer(&location).await.unwrap();
        assert_eq!(record.status, CustomerStatus::Verified);
    }

    fn sample_payload() -> CustomerPayload {
        CustomerPayload::from(&crate::domain::company::test_request())
    }
}
