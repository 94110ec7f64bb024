use crate::domain::context::RequestContext;
use crate::domain::document::{Document, DocumentHolder};
use crate::domain::ports::{BlobStoreBox, CompanyStoreBox, DocumentStoreBox};
use crate::domain::processor::ProcessorClientBox;
use crate::domain::status::{CustomerStatus, DocumentType};
use crate::error::{Error, Result};
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

/// Compliance document handling: local upload with an all-or-nothing
/// metadata+blob unit, submission to the processor, listing, and soft
/// deletion.
pub struct DocumentService {
    documents: DocumentStoreBox,
    blobs: BlobStoreBox,
    companies: CompanyStoreBox,
    processor: ProcessorClientBox,
}

impl DocumentService {
    pub fn new(
        documents: DocumentStoreBox,
        blobs: BlobStoreBox,
        companies: CompanyStoreBox,
        processor: ProcessorClientBox,
    ) -> Self {
        Self {
            documents,
            blobs,
            companies,
            processor,
        }
    }

    /// Persists metadata, then stores the bytes. If the blob write fails the
    /// metadata row is removed again so no orphan survives the unit.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        holder: DocumentHolder,
        doc_type: DocumentType,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Document> {
        ctx.require_admin()?;
        if bytes.is_empty() {
            return Err(Error::NotAcceptable("file missing".to_string()));
        }

        let document = Document::new(ctx.tenant_id(), holder, doc_type, original_name);
        self.documents.store(document.clone()).await?;

        if let Err(err) = self.blobs.save(&document.file_name, bytes).await {
            if let Err(rollback_err) = self.documents.remove(ctx.tenant_id(), document.id).await {
                warn!(
                    document_id = %document.id,
                    %rollback_err,
                    "blob write failed and metadata rollback also failed; reconciliation required"
                );
            }
            return Err(err);
        }

        Ok(document)
    }

    /// Sends a stored document to the processor for verification. Only
    /// permitted while the processor is asking for documents.
    pub async fn submit_for_verification(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<Document> {
        ctx.require_admin()?;

        let mut document = self.active_document(ctx, document_id).await?;
        let company = self
            .companies
            .get(ctx.tenant_id())
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or(Error::NotFound("tenant company"))?;

        if company.status != CustomerStatus::Document {
            return Err(Error::NotAcceptable(
                "documents can only be submitted while the processor has requested them"
                    .to_string(),
            ));
        }

        let bytes = self
            .blobs
            .load(&document.file_name)
            .await?
            .ok_or(Error::NotFound("document content"))?;

        let location = self
            .processor
            .create_document(
                &company.processor_uri,
                &document.name,
                document.doc_type,
                &bytes,
            )
            .await?;
        let record = self.processor.get_document(&location).await?;
        if let Some(reason) = record.failure_reason {
            return Err(Error::Internal(reason));
        }

        document.processor_uri = Some(location);
        self.documents.store(document.clone()).await?;
        Ok(document)
    }

    /// Documents the processor currently holds for the tenant's company.
    pub async fn list_processor_documents(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<crate::domain::processor::ProcessorDocument>> {
        ctx.require_admin_reader()?;
        let company = self
            .companies
            .get(ctx.tenant_id())
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or(Error::NotFound("tenant company"))?;
        Ok(self.processor.list_documents(&company.processor_uri).await?)
    }

    /// Soft-deleted rows are filtered out.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        holder: &DocumentHolder,
    ) -> Result<Vec<Document>> {
        ctx.require_admin_reader()?;
        let documents = self.documents.list(ctx.tenant_id(), holder).await?;
        Ok(documents.into_iter().filter(|d| !d.is_deleted()).collect())
    }

    pub async fn download_link(&self, ctx: &RequestContext, document_id: Uuid) -> Result<String> {
        ctx.require_admin_reader()?;
        let document = self.active_document(ctx, document_id).await?;
        self.blobs.download_link(&document.file_name).await
    }

    /// Removes the blob and sets the soft-delete marker; the metadata row
    /// itself is kept.
    pub async fn delete(&self, ctx: &RequestContext, document_id: Uuid) -> Result<()> {
        ctx.require_admin()?;

        let mut document = self.active_document(ctx, document_id).await?;
        self.blobs.delete(&document.file_name).await?;
        document.deleted_at = Some(Utc::now());
        self.documents.store(document).await
    }

    async fn active_document(&self, ctx: &RequestContext, document_id: Uuid) -> Result<Document> {
        self.documents
            .get(ctx.tenant_id(), document_id)
            .await?
            .filter(|d| !d.is_deleted())
            .ok_or(Error::NotFound("document"))
    }
}
