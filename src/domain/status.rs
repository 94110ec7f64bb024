use serde::{Deserialize, Serialize};
use std::fmt;

/// Onboarding progression of a contractor profile as shown to tenant admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileStatus {
    Invited,
    ProfileIncomplete,
    BankRequired,
    DocumentRequired,
    Active,
    JobPending,
}

/// Verification status the payments processor reports for a customer record.
/// Wire values must match the processor's vocabulary exactly; they are part
/// of the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Unverified,
    Verified,
    Document,
    Suspended,
    Retry,
}

impl CustomerStatus {
    /// Verification can only be retried after the processor asked for more
    /// documents or an explicit retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CustomerStatus::Document | CustomerStatus::Retry)
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustomerStatus::Unverified => "unverified",
            CustomerStatus::Verified => "verified",
            CustomerStatus::Document => "document",
            CustomerStatus::Suspended => "suspended",
            CustomerStatus::Retry => "retry",
        };
        f.write_str(s)
    }
}

/// Local status of a money transfer. `Pending` is the initial state; every
/// other status is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Completed,
    Cancelled,
    Failed,
    Reclaimed,
}

impl TransferStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Completed => "completed",
            TransferStatus::Cancelled => "cancelled",
            TransferStatus::Failed => "failed",
            TransferStatus::Reclaimed => "reclaimed",
        };
        f.write_str(s)
    }
}

/// Allow-list of compliance document types accepted by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Passport,
    License,
    IdCard,
    BusinessFormationDoc,
    Other,
}

/// Processor-side verification outcome for an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!TransferStatus::Pending.is_terminal());
        for status in [
            TransferStatus::Completed,
            TransferStatus::Cancelled,
            TransferStatus::Failed,
            TransferStatus::Reclaimed,
        ] {
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(CustomerStatus::Document.is_retryable());
        assert!(CustomerStatus::Retry.is_retryable());
        assert!(!CustomerStatus::Verified.is_retryable());
        assert!(!CustomerStatus::Suspended.is_retryable());
        assert!(!CustomerStatus::Unverified.is_retryable());
    }

    #[test]
    fn test_customer_status_wire_values() {
        let json = serde_json::to_string(&CustomerStatus::Document).unwrap();
        assert_eq!(json, "\"document\"");

        let parsed: CustomerStatus = serde_json::from_str("\"retry\"").unwrap();
        assert_eq!(parsed, CustomerStatus::Retry);

        assert!(serde_json::from_str::<CustomerStatus>("\"frozen\"").is_err());
    }

    #[test]
    fn test_profile_status_wire_values() {
        let json = serde_json::to_string(&ProfileStatus::BankRequired).unwrap();
        assert_eq!(json, "\"bank-required\"");
    }
}
