use crate::domain::company::{CompanyRequest, CustomerPatch, TenantCompany};
use crate::domain::context::RequestContext;
use crate::domain::owner::{BeneficialOwner, OwnerRequest};
use crate::domain::ports::{CompanyStoreBox, OwnerStoreBox};
use crate::domain::processor::{CustomerPayload, FundingSourceRequest, ProcessorClientBox};
use crate::domain::status::CustomerStatus;
use crate::error::{Error, Result};
use tracing::info;
use uuid::Uuid;

/// Drives the tenant payments-onboarding lifecycle: company submission,
/// corrections and retries, beneficial-owner disclosure, and funding-source
/// linkage. All external status values come from the processor.
pub struct OnboardingService {
    companies: CompanyStoreBox,
    owners: OwnerStoreBox,
    processor: ProcessorClientBox,
}

impl OnboardingService {
    pub fn new(
        companies: CompanyStoreBox,
        owners: OwnerStoreBox,
        processor: ProcessorClientBox,
    ) -> Self {
        Self {
            companies,
            owners,
            processor,
        }
    }

    pub async fn get_company(&self, ctx: &RequestContext) -> Result<TenantCompany> {
        ctx.require_admin_reader()?;
        self.active_company(ctx.tenant_id()).await
    }

    /// Submits a new company to the processor and persists the returned
    /// location and verification status. Fails with Conflict when the tenant
    /// already has a company.
    pub async fn create_company(
        &self,
        ctx: &RequestContext,
        request: &CompanyRequest,
    ) -> Result<TenantCompany> {
        ctx.require_admin()?;
        request.validate()?;

        if let Some(existing) = self.companies.get(ctx.tenant_id()).await?
            && !existing.is_deleted()
        {
            return Err(Error::Conflict(
                "a company already exists for this tenant".to_string(),
            ));
        }

        let payload = CustomerPayload::from(request);
        let location = self.processor.create_customer(&payload).await?;
        let record = self.processor.get_customer(&location).await?;

        let company = TenantCompany::new(ctx.tenant_id(), request, location, record.status);
        self.companies.store(company.clone()).await?;
        info!(tenant_id = %ctx.tenant_id(), status = %company.status, "company submitted");
        Ok(company)
    }

    /// Pushes the fields updatable in the current verification status to the
    /// processor and merges exactly those fields locally.
    pub async fn update_company(
        &self,
        ctx: &RequestContext,
        request: &CompanyRequest,
    ) -> Result<TenantCompany> {
        ctx.require_admin()?;
        request.validate()?;

        let mut company = self.active_company(ctx.tenant_id()).await?;
        let Some(patch) = CustomerPatch::pick(request, company.status) else {
            return Err(Error::NotAcceptable(format!(
                "company cannot be updated while verification status is {}",
                company.status
            )));
        };

        self.processor
            .update_customer(&company.processor_uri, &patch)
            .await?;
        company.apply_patch(&patch);
        self.companies.store(company.clone()).await?;
        Ok(company)
    }

    /// Re-submits a corrected full payload. Only valid after the processor
    /// asked for documents or an explicit retry.
    pub async fn retry_company(
        &self,
        ctx: &RequestContext,
        request: &CompanyRequest,
    ) -> Result<TenantCompany> {
        ctx.require_admin()?;
        request.validate()?;

        let mut company = self.active_company(ctx.tenant_id()).await?;
        if !company.status.is_retryable() {
            return Err(Error::NotAcceptable(format!(
                "verification cannot be retried from status {}",
                company.status
            )));
        }

        let payload = CustomerPayload::from(request);
        self.processor
            .resubmit_customer(&company.processor_uri, &payload)
            .await?;
        let record = self.processor.get_customer(&company.processor_uri).await?;

        company.merge_resubmission(request, record.status);
        self.companies.store(company.clone()).await?;
        info!(tenant_id = %ctx.tenant_id(), status = %company.status, "company resubmitted");
        Ok(company)
    }

    pub async fn list_owners(&self, ctx: &RequestContext) -> Result<Vec<BeneficialOwner>> {
        ctx.require_admin_reader()?;
        self.owners.list(ctx.tenant_id()).await
    }

    pub async fn get_owner(&self, ctx: &RequestContext, id: Uuid) -> Result<BeneficialOwner> {
        ctx.require_admin_reader()?;
        self.owners
            .get(ctx.tenant_id(), id)
            .await?
            .ok_or(Error::NotFound("beneficial owner"))
    }

    pub async fn add_owner(
        &self,
        ctx: &RequestContext,
        request: &OwnerRequest,
    ) -> Result<BeneficialOwner> {
        ctx.require_admin()?;
        request.validate()?;

        let company = self.editable_company(ctx.tenant_id()).await?;
        let location = self
            .processor
            .create_owner(&company.processor_uri, &request.identity)
            .await?;
        let record = self.processor.get_owner(&location).await?;

        let owner = BeneficialOwner::new(ctx.tenant_id(), &request.identity, location, record.status);
        self.owners.store(owner.clone()).await?;
        Ok(owner)
    }

    pub async fn edit_owner(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: &OwnerRequest,
    ) -> Result<BeneficialOwner> {
        ctx.require_admin()?;
        request.validate()?;
        self.editable_company(ctx.tenant_id()).await?;

        let mut owner = self
            .owners
            .get(ctx.tenant_id(), id)
            .await?
            .ok_or(Error::NotFound("beneficial owner"))?;

        self.processor
            .update_owner(&owner.processor_uri, &request.identity)
            .await?;
        let record = self.processor.get_owner(&owner.processor_uri).await?;

        owner.merge(&request.identity, record.status);
        self.owners.store(owner.clone()).await?;
        Ok(owner)
    }

    pub async fn delete_owner(&self, ctx: &RequestContext, id: Uuid) -> Result<()> {
        ctx.require_admin()?;
        self.editable_company(ctx.tenant_id()).await?;

        let owner = self
            .owners
            .get(ctx.tenant_id(), id)
            .await?
            .ok_or(Error::NotFound("beneficial owner"))?;

        self.processor.remove_owner(&owner.processor_uri).await?;
        self.owners.delete(ctx.tenant_id(), id).await
    }

    /// Links a bank funding source to the tenant's company and stores the
    /// processor-assigned location.
    pub async fn link_funding_source(
        &self,
        ctx: &RequestContext,
        request: &FundingSourceRequest,
    ) -> Result<TenantCompany> {
        ctx.require_admin()?;

        let mut company = self.active_company(ctx.tenant_id()).await?;
        let location = self
            .processor
            .create_funding_source(&company.processor_uri, request)
            .await?;
        company.funding_source_uri = Some(location);
        self.companies.store(company.clone()).await?;
        Ok(company)
    }

    pub async fn unlink_funding_source(&self, ctx: &RequestContext) -> Result<TenantCompany> {
        ctx.require_admin()?;

        let mut company = self.active_company(ctx.tenant_id()).await?;
        let Some(location) = company.funding_source_uri.take() else {
            return Err(Error::NotFound("funding source"));
        };
        self.processor.remove_funding_source(&location).await?;
        company.updated_at = chrono::Utc::now();
        self.companies.store(company.clone()).await?;
        Ok(company)
    }

    async fn active_company(&self, tenant_id: Uuid) -> Result<TenantCompany> {
        self.companies
            .get(tenant_id)
            .await?
            .filter(|company| !company.is_deleted())
            .ok_or(Error::NotFound("tenant company"))
    }

    /// Owner disclosure is only editable until the company is verified;
    /// afterwards changes go through a separate compliance path.
    async fn editable_company(&self, tenant_id: Uuid) -> Result<TenantCompany> {
        let company = self.active_company(tenant_id).await?;
        if company.status == CustomerStatus::Verified {
            return Err(Error::NotAcceptable(
                "beneficial owners cannot be changed after verification".to_string(),
            ));
        }
        Ok(company)
    }
}
