use async_trait::async_trait;
use payline::application::documents::DocumentService;
use payline::application::onboarding::OnboardingService;
use payline::application::transfers::TransferService;
use payline::application::webhook::WebhookProcessor;
use payline::domain::company::CompanyRequest;
use payline::domain::owner::{OwnerAddress, OwnerIdentity, OwnerRequest};
use payline::domain::ports::{BlobStore, BlobStoreBox};
use payline::error::{Error, Result};
use payline::infrastructure::in_memory::{
    InMemoryBlobStore, InMemoryCompanyStore, InMemoryDocumentStore, InMemoryOwnerStore,
    InMemoryTransferStore,
};
use payline::infrastructure::mock_processor::MockProcessorClient;

/// Shared in-memory backend. The concrete stores are cloneable handles over
/// the same state, so a test can hand boxed ports to several services and
/// still inspect the data directly.
pub struct TestBackend {
    pub companies: InMemoryCompanyStore,
    pub owners: InMemoryOwnerStore,
    pub transfers: InMemoryTransferStore,
    pub documents: InMemoryDocumentStore,
    pub blobs: InMemoryBlobStore,
    pub processor: MockProcessorClient,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            companies: InMemoryCompanyStore::new(),
            owners: InMemoryOwnerStore::new(),
            transfers: InMemoryTransferStore::new(),
            documents: InMemoryDocumentStore::new(),
            blobs: InMemoryBlobStore::new(),
            processor: MockProcessorClient::new(),
        }
    }

    pub fn onboarding(&self) -> OnboardingService {
        OnboardingService::new(
            Box::new(self.companies.clone()),
            Box::new(self.owners.clone()),
            Box::new(self.processor.clone()),
        )
    }

    pub fn webhooks(&self) -> WebhookProcessor {
        WebhookProcessor::new(
            Box::new(self.transfers.clone()),
            Box::new(self.companies.clone()),
            Box::new(self.documents.clone()),
        )
    }

    pub fn document_service(&self) -> DocumentService {
        self.document_service_with_blobs(Box::new(self.blobs.clone()))
    }

    pub fn document_service_with_blobs(&self, blobs: BlobStoreBox) -> DocumentService {
        DocumentService::new(
            Box::new(self.documents.clone()),
            blobs,
            Box::new(self.companies.clone()),
            Box::new(self.processor.clone()),
        )
    }

    pub fn transfer_service(&self) -> TransferService {
        TransferService::new(
            Box::new(self.transfers.clone()),
            Box::new(self.processor.clone()),
        )
    }
}

pub fn company_request() -> CompanyRequest {
    CompanyRequest {
        first_name: "Avery".to_string(),
        last_name: "Lind".to_string(),
        phone: "555-0132".to_string(),
        email: "avery@lindworks.example".to_string(),
        date_of_birth: "1979-11-02".to_string(),
        ssn: "987-65-4321".to_string(),
        country: "US".to_string(),
        state: "WA".to_string(),
        city: "Tacoma".to_string(),
        postal_code: "98402".to_string(),
        address1: "400 Dock St".to_string(),
        address2: None,
        business_name: "Lindworks LLC".to_string(),
        doing_business_as: None,
        business_type: "llc".to_string(),
        business_classification: "9ed38155-7d6f-11e3-83c3-5404a6144203".to_string(),
        ein: Some("12-3456789".to_string()),
        website: None,
        controller: owner_identity(),
    }
}

pub fn owner_identity() -> OwnerIdentity {
    OwnerIdentity {
        first_name: "Jordan".to_string(),
        last_name: "Reyes".to_string(),
        title: "CFO".to_string(),
        date_of_birth: "1984-03-12".to_string(),
        ssn: "123-45-6789".to_string(),
        address: OwnerAddress {
            address1: "12 Harbor Way".to_string(),
            address2: None,
            city: "Oakland".to_string(),
            state_province_region: "CA".to_string(),
            postal_code: "94607".to_string(),
            country: "US".to_string(),
        },
    }
}

pub fn owner_request() -> OwnerRequest {
    OwnerRequest {
        identity: owner_identity(),
    }
}

/// Blob store whose writes always fail; drives the upload rollback path.
#[derive(Default, Clone)]
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn save(&self, _file_name: &str, _bytes: &[u8]) -> Result<()> {
        Err(Error::Storage("blob backend unavailable".to_string()))
    }

    async fn load(&self, _file_name: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn delete(&self, _file_name: &str) -> Result<()> {
        Ok(())
    }

    async fn download_link(&self, _file_name: &str) -> Result<String> {
        Err(Error::Storage("blob backend unavailable".to_string()))
    }
}
