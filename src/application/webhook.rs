use crate::domain::event::{EventTopic, WebhookEvent};
use crate::domain::ports::{CompanyStoreBox, DocumentStoreBox, TransferStoreBox};
use crate::domain::transfer::StatusChange;
use crate::error::Result;
use chrono::Utc;
use tracing::{error, info, warn};

/// How an inbound event was handled. The receiving boundary acknowledges
/// every delivery regardless of the outcome — the processor penalizes
/// endpoints that fail loudly — so the swallowed-error path is an explicit
/// value rather than an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    IgnoredUnknownTopic,
    DroppedMissingLink,
    EntityNotFound,
    /// Internal storage fault while applying the event. Logged for
    /// reconciliation; still acknowledged.
    Failed,
}

/// Classifies inbound processor events and applies the resulting status
/// transitions to transfers, companies, and documents.
pub struct WebhookProcessor {
    transfers: TransferStoreBox,
    companies: CompanyStoreBox,
    documents: DocumentStoreBox,
}

impl WebhookProcessor {
    pub fn new(
        transfers: TransferStoreBox,
        companies: CompanyStoreBox,
        documents: DocumentStoreBox,
    ) -> Self {
        Self {
            transfers,
            companies,
            documents,
        }
    }

    /// Entry point for a raw request body. Never returns an error.
    pub async fn receive(&self, body: &str) -> WebhookOutcome {
        match serde_json::from_str::<WebhookEvent>(body) {
            Ok(event) => self.process(&event).await,
            Err(err) => {
                error!(%err, "discarding malformed webhook envelope");
                WebhookOutcome::Failed
            }
        }
    }

    pub async fn process(&self, event: &WebhookEvent) -> WebhookOutcome {
        let outcome = if event.topic.transfer_status().is_some() {
            self.apply_transfer_event(event).await
        } else if event.topic.customer_status().is_some() {
            self.apply_customer_event(event).await
        } else if event.topic.document_status().is_some() {
            self.apply_document_event(event).await
        } else {
            info!(topic = %event.topic, "ignoring unrecognized webhook topic");
            return WebhookOutcome::IgnoredUnknownTopic;
        };

        match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(topic = %event.topic, %err, "webhook event failed; reconciliation required");
                WebhookOutcome::Failed
            }
        }
    }

    async fn apply_transfer_event(&self, event: &WebhookEvent) -> Result<WebhookOutcome> {
        let Some(href) = event.resource_href() else {
            error!(topic = %event.topic, "webhook event missing resource link; dropped");
            return Ok(WebhookOutcome::DroppedMissingLink);
        };

        let Some(mut transfer) = self.transfers.find_by_external_id(href).await? else {
            info!(topic = %event.topic, resource = href, "no transfer matches webhook resource");
            return Ok(WebhookOutcome::EntityNotFound);
        };

        match transfer.apply_topic(&event.topic) {
            StatusChange::Unchanged => {}
            StatusChange::Updated(status) => {
                info!(resource = href, %status, "transfer status updated");
                self.transfers.store(transfer).await?;
            }
            StatusChange::Overridden { from, to } => {
                // The processor is the source of truth; the latest event wins
                // even when it contradicts a terminal status already applied.
                warn!(
                    resource = href,
                    %from,
                    %to,
                    "terminal transfer status overridden by later webhook"
                );
                self.transfers.store(transfer).await?;
            }
        }
        Ok(WebhookOutcome::Processed)
    }

    async fn apply_customer_event(&self, event: &WebhookEvent) -> Result<WebhookOutcome> {
        let Some(href) = event.resource_href() else {
            error!(topic = %event.topic, "webhook event missing resource link; dropped");
            return Ok(WebhookOutcome::DroppedMissingLink);
        };

        let Some(mut company) = self.companies.find_by_processor_uri(href).await? else {
            info!(topic = %event.topic, resource = href, "no company matches webhook resource");
            return Ok(WebhookOutcome::EntityNotFound);
        };

        let status = event
            .topic
            .customer_status()
            .unwrap_or(company.status);
        if status != company.status {
            info!(resource = href, from = %company.status, to = %status, "company verification status updated");
            company.status = status;
            company.updated_at = Utc::now();
            self.companies.store(company).await?;
        }
        Ok(WebhookOutcome::Processed)
    }

    async fn apply_document_event(&self, event: &WebhookEvent) -> Result<WebhookOutcome> {
        let Some(href) = event.resource_href() else {
            error!(topic = %event.topic, "webhook event missing resource link; dropped");
            return Ok(WebhookOutcome::DroppedMissingLink);
        };

        let Some(mut document) = self.documents.find_by_processor_uri(href).await? else {
            info!(topic = %event.topic, resource = href, "no document matches webhook resource");
            return Ok(WebhookOutcome::EntityNotFound);
        };

        let status = event
            .topic
            .document_status()
            .unwrap_or(document.status);
        let failure_reason = match event.topic {
            EventTopic::CustomerVerificationDocumentFailed => {
                Some("rejected by processor verification".to_string())
            }
            _ => None,
        };
        document.record_outcome(status, failure_reason);
        self.documents.store(document).await?;
        Ok(WebhookOutcome::Processed)
    }
}
