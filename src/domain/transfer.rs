use crate::domain::event::EventTopic;
use crate::domain::status::TransferStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A money movement record. Created when a transfer is initiated against the
/// processor; its status afterwards changes only through webhook-driven
/// updates. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    /// Processor-assigned location URI; the durable external reference.
    pub external_id: String,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of applying a webhook topic to a transfer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Same status reapplied, or a `created` event against an already-known
    /// transfer. Idempotent, nothing to persist.
    Unchanged,
    Updated(TransferStatus),
    /// A terminal status was replaced by a different terminal status. The
    /// processor is the source of truth, so the latest event wins, but this
    /// signals out-of-order or anomalous delivery.
    Overridden {
        from: TransferStatus,
        to: TransferStatus,
    },
}

impl Transfer {
    pub fn new(tenant_id: Uuid, user_id: Uuid, external_id: String, amount: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            user_id,
            external_id,
            amount,
            status: TransferStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the status a transfer topic maps to. Topics that do not
    /// affect transfers leave the record untouched.
    pub fn apply_topic(&mut self, topic: &EventTopic) -> StatusChange {
        let Some(target) = topic.transfer_status() else {
            return StatusChange::Unchanged;
        };

        if target == self.status || target == TransferStatus::Pending {
            return StatusChange::Unchanged;
        }

        let previous = self.status;
        self.status = target;
        self.updated_at = Utc::now();

        if previous.is_terminal() {
            StatusChange::Overridden {
                from: previous,
                to: target,
            }
        } else {
            StatusChange::Updated(target)
        }
    }
}
