use crate::domain::company::TenantCompany;
use crate::domain::document::{Document, DocumentHolder};
use crate::domain::owner::BeneficialOwner;
use crate::domain::ports::{BlobStore, CompanyStore, DocumentStore, OwnerStore, TransferStore};
use crate::domain::transfer::Transfer;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe in-memory adapters for the storage ports.
///
/// Each store is an `Arc<RwLock<HashMap>>` keyed by tenant (and entity id
/// where applicable), so cloning a store shares state — the same concrete
/// store can back several boxed ports.

#[derive(Default, Clone)]
pub struct InMemoryCompanyStore {
    companies: Arc<RwLock<HashMap<Uuid, TenantCompany>>>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn store(&self, company: TenantCompany) -> Result<()> {
        let mut companies = self.companies.write().await;
        companies.insert(company.tenant_id, company);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid) -> Result<Option<TenantCompany>> {
        let companies = self.companies.read().await;
        Ok(companies.get(&tenant_id).cloned())
    }

    async fn find_by_processor_uri(&self, uri: &str) -> Result<Option<TenantCompany>> {
        let companies = self.companies.read().await;
        Ok(companies
            .values()
            .find(|company| company.processor_uri == uri)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryOwnerStore {
    owners: Arc<RwLock<HashMap<(Uuid, Uuid), BeneficialOwner>>>,
}

impl InMemoryOwnerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OwnerStore for InMemoryOwnerStore {
    async fn store(&self, owner: BeneficialOwner) -> Result<()> {
        let mut owners = self.owners.write().await;
        owners.insert((owner.tenant_id, owner.id), owner);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<BeneficialOwner>> {
        let owners = self.owners.read().await;
        Ok(owners.get(&(tenant_id, id)).cloned())
    }

    async fn list(&self, tenant_id: Uuid) -> Result<Vec<BeneficialOwner>> {
        let owners = self.owners.read().await;
        let mut result: Vec<BeneficialOwner> = owners
            .values()
            .filter(|owner| owner.tenant_id == tenant_id)
            .cloned()
            .collect();
        result.sort_by_key(|owner| owner.created_at);
        Ok(result)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<()> {
        let mut owners = self.owners.write().await;
        owners.remove(&(tenant_id, id));
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryTransferStore {
    transfers: Arc<RwLock<HashMap<(Uuid, Uuid), Transfer>>>,
}

impl InMemoryTransferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored transfer; demo/reporting only, not part of
    /// the tenant-scoped port.
    pub async fn all(&self) -> Vec<Transfer> {
        let transfers = self.transfers.read().await;
        transfers.values().cloned().collect()
    }
}

#[async_trait]
impl TransferStore for InMemoryTransferStore {
    async fn store(&self, transfer: Transfer) -> Result<()> {
        let mut transfers = self.transfers.write().await;
        transfers.insert((transfer.tenant_id, transfer.id), transfer);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Transfer>> {
        let transfers = self.transfers.read().await;
        Ok(transfers.get(&(tenant_id, id)).cloned())
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Transfer>> {
        let transfers = self.transfers.read().await;
        Ok(transfers
            .values()
            .find(|transfer| transfer.external_id == external_id)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<(Uuid, Uuid), Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn store(&self, document: Document) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert((document.tenant_id, document.id), document);
        Ok(())
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&(tenant_id, id)).cloned())
    }

    async fn list(&self, tenant_id: Uuid, holder: &DocumentHolder) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        let mut result: Vec<Document> = documents
            .values()
            .filter(|doc| doc.tenant_id == tenant_id && doc.holder == *holder)
            .cloned()
            .collect();
        result.sort_by_key(|doc| doc.created_at);
        Ok(result)
    }

    async fn remove(&self, tenant_id: Uuid, id: Uuid) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.remove(&(tenant_id, id));
        Ok(())
    }

    async fn find_by_processor_uri(&self, uri: &str) -> Result<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .find(|doc| doc.processor_uri.as_deref() == Some(uri))
            .cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self.blobs.read().await;
        Ok(blobs.get(file_name).cloned())
    }

    async fn delete(&self, file_name: &str) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.remove(file_name);
        Ok(())
    }

    async fn download_link(&self, file_name: &str) -> Result<String> {
        Ok(format!("memory://documents/{file_name}"))
    }
}
