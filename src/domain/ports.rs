use crate::domain::company::TenantCompany;
use crate::domain::document::{Document, DocumentHolder};
use crate::domain::owner::BeneficialOwner;
use crate::domain::transfer::Transfer;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub type CompanyStoreBox = Box<dyn CompanyStore>;
pub type OwnerStoreBox = Box<dyn OwnerStore>;
pub type TransferStoreBox = Box<dyn TransferStore>;
pub type DocumentStoreBox = Box<dyn DocumentStore>;
pub type BlobStoreBox = Box<dyn BlobStore>;

/// Storage ports. Every lookup is scoped to the caller's tenant id; the only
/// exceptions are the `*_by_external`/`*_by_processor_uri` resolutions used
/// by webhook processing, which are explicitly for all tenants because
/// inbound events carry no tenant.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn store(&self, company: TenantCompany) -> Result<()>;
    async fn get(&self, tenant_id: Uuid) -> Result<Option<TenantCompany>>;
    /// For all tenants; webhook resolution path.
    async fn find_by_processor_uri(&self, uri: &str) -> Result<Option<TenantCompany>>;
}

#[async_trait]
pub trait OwnerStore: Send + Sync {
    async fn store(&self, owner: BeneficialOwner) -> Result<()>;
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<BeneficialOwner>>;
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<BeneficialOwner>>;
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait TransferStore: Send + Sync {
    async fn store(&self, transfer: Transfer) -> Result<()>;
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Transfer>>;
    /// For all tenants; webhook resolution path.
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Transfer>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn store(&self, document: Document) -> Result<()>;
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Document>>;
    async fn list(&self, tenant_id: Uuid, holder: &DocumentHolder) -> Result<Vec<Document>>;
    /// Physically removes a metadata row. Only the upload rollback path uses
    /// this; regular deletion is a soft delete via `store`.
    async fn remove(&self, tenant_id: Uuid, id: Uuid) -> Result<()>;
    /// For all tenants; webhook resolution path.
    async fn find_by_processor_uri(&self, uri: &str) -> Result<Option<Document>>;
}

/// Opaque blob storage for document bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>>;
    async fn delete(&self, file_name: &str) -> Result<()>;
    async fn download_link(&self, file_name: &str) -> Result<String>;
}
