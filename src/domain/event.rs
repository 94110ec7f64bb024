use crate::domain::status::{CustomerStatus, DocumentStatus, TransferStatus};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Topic of an inbound processor notification. Topics the processor may add
/// in the future deserialize to `Unknown` instead of failing delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTopic {
    TransferCreated,
    TransferCancelled,
    TransferFailed,
    TransferReclaimed,
    TransferCompleted,
    CustomerVerified,
    CustomerSuspended,
    CustomerVerificationDocumentNeeded,
    CustomerReverificationNeeded,
    CustomerVerificationDocumentApproved,
    CustomerVerificationDocumentFailed,
    Unknown(String),
}

impl EventTopic {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "transfer_created" => EventTopic::TransferCreated,
            "transfer_cancelled" => EventTopic::TransferCancelled,
            "transfer_failed" => EventTopic::TransferFailed,
            "transfer_reclaimed" => EventTopic::TransferReclaimed,
            "transfer_completed" => EventTopic::TransferCompleted,
            "customer_verified" => EventTopic::CustomerVerified,
            "customer_suspended" => EventTopic::CustomerSuspended,
            "customer_verification_document_needed" => {
                EventTopic::CustomerVerificationDocumentNeeded
            }
            "customer_reverification_needed" => EventTopic::CustomerReverificationNeeded,
            "customer_verification_document_approved" => {
                EventTopic::CustomerVerificationDocumentApproved
            }
            "customer_verification_document_failed" => {
                EventTopic::CustomerVerificationDocumentFailed
            }
            other => EventTopic::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            EventTopic::TransferCreated => "transfer_created",
            EventTopic::TransferCancelled => "transfer_cancelled",
            EventTopic::TransferFailed => "transfer_failed",
            EventTopic::TransferReclaimed => "transfer_reclaimed",
            EventTopic::TransferCompleted => "transfer_completed",
            EventTopic::CustomerVerified => "customer_verified",
            EventTopic::CustomerSuspended => "customer_suspended",
            EventTopic::CustomerVerificationDocumentNeeded => {
                "customer_verification_document_needed"
            }
            EventTopic::CustomerReverificationNeeded => "customer_reverification_needed",
            EventTopic::CustomerVerificationDocumentApproved => {
                "customer_verification_document_approved"
            }
            EventTopic::CustomerVerificationDocumentFailed => {
                "customer_verification_document_failed"
            }
            EventTopic::Unknown(s) => s,
        }
    }

    /// Local transfer status a transfer topic maps to. `None` for topics that
    /// do not affect transfers.
    pub fn transfer_status(&self) -> Option<TransferStatus> {
        match self {
            EventTopic::TransferCreated => Some(TransferStatus::Pending),
            EventTopic::TransferCancelled => Some(TransferStatus::Cancelled),
            EventTopic::TransferFailed => Some(TransferStatus::Failed),
            EventTopic::TransferReclaimed => Some(TransferStatus::Reclaimed),
            EventTopic::TransferCompleted => Some(TransferStatus::Completed),
            _ => None,
        }
    }

    /// Company verification status a customer topic maps to. The local
    /// record only ever takes statuses derived here or returned by the
    /// processor directly.
    pub fn customer_status(&self) -> Option<CustomerStatus> {
        match self {
            EventTopic::CustomerVerified => Some(CustomerStatus::Verified),
            EventTopic::CustomerSuspended => Some(CustomerStatus::Suspended),
            EventTopic::CustomerVerificationDocumentNeeded => Some(CustomerStatus::Document),
            EventTopic::CustomerReverificationNeeded => Some(CustomerStatus::Retry),
            _ => None,
        }
    }

    /// Verification outcome a document topic maps to.
    pub fn document_status(&self) -> Option<DocumentStatus> {
        match self {
            EventTopic::CustomerVerificationDocumentApproved => Some(DocumentStatus::Approved),
            EventTopic::CustomerVerificationDocumentFailed => Some(DocumentStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for EventTopic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Err(D::Error::custom("topic must not be empty"));
        }
        Ok(EventTopic::from_wire(&s))
    }
}

impl Serialize for EventTopic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_wire())
    }
}

/// Inbound notification envelope. Processed transiently; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub topic: EventTopic,
    #[serde(rename = "_links", default)]
    pub links: EventLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLink {
    pub href: String,
}

impl WebhookEvent {
    pub fn new(topic: EventTopic, resource_href: impl Into<String>) -> Self {
        Self {
            topic,
            links: EventLinks {
                resource: Some(ResourceLink {
                    href: resource_href.into(),
                }),
            },
        }
    }

    /// External URI of the resource the event refers to, when present.
    pub fn resource_href(&self) -> Option<&str> {
        self.links
            .resource
            .as_ref()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}
