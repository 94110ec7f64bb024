use crate::error::{Error, Result};
use uuid::Uuid;

/// Capability carried by the authenticated caller. Authentication itself is
/// out of scope; the gates below treat it as an opaque predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Admin,
    AdminReader,
}

/// Explicit per-request caller context. Every core operation takes one of
/// these instead of reading ambient state, which keeps tenant scoping
/// visible at each call site.
#[derive(Debug, Clone)]
pub struct RequestContext {
    tenant_id: Uuid,
    capability: Capability,
}

impl RequestContext {
    pub fn new(tenant_id: Uuid, capability: Capability) -> Self {
        Self {
            tenant_id,
            capability,
        }
    }

    pub fn admin(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, Capability::Admin)
    }

    pub fn admin_reader(tenant_id: Uuid) -> Self {
        Self::new(tenant_id, Capability::AdminReader)
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn require_admin(&self) -> Result<()> {
        match self.capability {
            Capability::Admin => Ok(()),
            Capability::AdminReader => Err(Error::NotAcceptable(
                "operation requires admin capability".to_string(),
            )),
        }
    }

    /// Read paths accept either capability.
    pub fn require_admin_reader(&self) -> Result<()> {
        Ok(())
    }
}
