use crate::domain::owner::OwnerIdentity;
use crate::domain::status::CustomerStatus;
use crate::domain::validate;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant's business identity as submitted to the payments processor.
///
/// The external status column is only ever written from a value the
/// processor returned or one derived by the topic/status tables; it is never
/// invented locally. Rows are soft-deleted only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCompany {
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub address1: String,
    pub address2: Option<String>,
    pub business_name: String,
    pub doing_business_as: Option<String>,
    pub business_type: String,
    pub business_classification: String,
    pub website: Option<String>,
    /// Processor-assigned customer location; the durable external reference.
    pub processor_uri: String,
    pub status: CustomerStatus,
    pub funding_source_uri: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantCompany {
    pub fn new(
        tenant_id: Uuid,
        request: &CompanyRequest,
        processor_uri: String,
        status: CustomerStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            tenant_id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            country: request.country.clone(),
            state: request.state.clone(),
            city: request.city.clone(),
            postal_code: request.postal_code.clone(),
            address1: request.address1.clone(),
            address2: request.address2.clone(),
            business_name: request.business_name.clone(),
            doing_business_as: request.doing_business_as.clone(),
            business_type: request.business_type.clone(),
            business_classification: request.business_classification.clone(),
            website: request.website.clone(),
            processor_uri,
            status,
            funding_source_uri: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies an accepted outbound patch to the local record. Only the
    /// fields that were actually pushed to the processor change.
    pub fn apply_patch(&mut self, patch: &CustomerPatch) {
        if let Some(v) = &patch.first_name {
            self.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            self.last_name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = &patch.business_name {
            self.business_name = v.clone();
        }
        if let Some(v) = &patch.address1 {
            self.address1 = v.clone();
        }
        if let Some(v) = &patch.address2 {
            self.address2 = Some(v.clone());
        }
        if let Some(v) = &patch.city {
            self.city = v.clone();
        }
        if let Some(v) = &patch.state {
            self.state = v.clone();
        }
        if let Some(v) = &patch.postal_code {
            self.postal_code = v.clone();
        }
        if let Some(v) = &patch.phone {
            self.phone = v.clone();
        }
        self.updated_at = Utc::now();
    }

    /// Replaces the full correctable profile after an accepted retry
    /// submission, taking the status the processor reported back.
    pub fn merge_resubmission(&mut self, request: &CompanyRequest, status: CustomerStatus) {
        self.first_name = request.first_name.clone();
        self.last_name = request.last_name.clone();
        self.phone = request.phone.clone();
        self.email = request.email.clone();
        self.country = request.country.clone();
        self.state = request.state.clone();
        self.city = request.city.clone();
        self.postal_code = request.postal_code.clone();
        self.address1 = request.address1.clone();
        self.address2 = request.address2.clone();
        self.business_name = request.business_name.clone();
        self.doing_business_as = request.doing_business_as.clone();
        self.business_type = request.business_type.clone();
        self.business_classification = request.business_classification.clone();
        self.website = request.website.clone();
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Company submission payload. Controller identity, date of birth and SSN
/// travel to the processor and are not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub business_name: String,
    #[serde(default)]
    pub doing_business_as: Option<String>,
    pub business_type: String,
    pub business_classification: String,
    #[serde(default)]
    pub ein: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub controller: OwnerIdentity,
}

impl CompanyRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        validate::require(&mut errors, "firstName", &self.first_name);
        validate::require(&mut errors, "lastName", &self.last_name);
        validate::require(&mut errors, "phone", &self.phone);
        validate::require_email(&mut errors, "email", &self.email);
        validate::require(&mut errors, "dateOfBirth", &self.date_of_birth);
        validate::require_ssn(&mut errors, "ssn", &self.ssn);
        validate::require(&mut errors, "country", &self.country);
        validate::require_state_code(&mut errors, "state", &self.state);
        validate::require(&mut errors, "city", &self.city);
        if !self.city.is_empty() && !self.city.chars().any(|c| c.is_alphabetic()) {
            errors.push(crate::error::FieldError::new(
                "city",
                "must contain letters",
            ));
        }
        validate::require(&mut errors, "postalCode", &self.postal_code);
        validate::require(&mut errors, "address1", &self.address1);
        validate::max_len(&mut errors, "address1", &self.address1, 50);
        if let Some(address2) = &self.address2 {
            validate::max_len(&mut errors, "address2", address2, 50);
        }
        validate::require(&mut errors, "businessName", &self.business_name);
        validate::require(&mut errors, "businessType", &self.business_type);
        validate::require(
            &mut errors,
            "businessClassification",
            &self.business_classification,
        );
        self.controller.validate_into(&mut errors, "controller");

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// Profile fields that may be pushed to the processor for a customer in a
/// given verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    FirstName,
    LastName,
    Email,
    BusinessName,
    Address1,
    Address2,
    City,
    State,
    PostalCode,
    Phone,
}

/// Which fields are safe to update externally in the given status.
///
/// Once a customer is verified, identity-defining fields are locked; before
/// verification, identity is still correctable but contact details go
/// through the full resubmission path instead. Every other status accepts
/// nothing through this interface.
pub fn updatable_fields(status: CustomerStatus) -> &'static [CompanyField] {
    match status {
        CustomerStatus::Verified => &[
            CompanyField::Email,
            CompanyField::Address1,
            CompanyField::Address2,
            CompanyField::City,
            CompanyField::State,
            CompanyField::PostalCode,
            CompanyField::Phone,
        ],
        CustomerStatus::Unverified => &[
            CompanyField::FirstName,
            CompanyField::LastName,
            CompanyField::Email,
            CompanyField::BusinessName,
        ],
        _ => &[],
    }
}

/// Outbound partial update of a processor customer record. Only fields
/// permitted by `updatable_fields` are ever populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CustomerPatch {
    /// Builds the patch for `request` limited to the fields updatable in
    /// `status`. Returns `None` when no field may be pushed.
    pub fn pick(request: &CompanyRequest, status: CustomerStatus) -> Option<Self> {
        let fields = updatable_fields(status);
        if fields.is_empty() {
            return None;
        }

        let mut patch = CustomerPatch::default();
        for field in fields {
            match field {
                CompanyField::FirstName => patch.first_name = Some(request.first_name.clone()),
                CompanyField::LastName => patch.last_name = Some(request.last_name.clone()),
                CompanyField::Email => patch.email = Some(request.email.clone()),
                CompanyField::BusinessName => {
                    patch.business_name = Some(request.business_name.clone());
                }
                CompanyField::Address1 => patch.address1 = Some(request.address1.clone()),
                CompanyField::Address2 => patch.address2 = request.address2.clone(),
                CompanyField::City => patch.city = Some(request.city.clone()),
                CompanyField::State => patch.state = Some(request.state.clone()),
                CompanyField::PostalCode => patch.postal_code = Some(request.postal_code.clone()),
                CompanyField::Phone => patch.phone = Some(request.phone.clone()),
            }
        }
        Some(patch)
    }
}

/// Canonical valid request used by unit tests across the crate.
#[cfg(test)]
pub(crate) fn test_request() -> CompanyRequest {
    use crate::domain::owner::OwnerAddress;

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
        controller: OwnerIdentity {
            first_name: "Avery".to_string(),
            last_name: "Lind".to_string(),
            title: "CEO".to_string(),
            date_of_birth: "1979-11-02".to_string(),
            ssn: "987-65-4321".to_string(),
            address: OwnerAddress {
                address1: "400 Dock St".to_string(),
                address2: None,
                city: "Tacoma".to_string(),
                state_province_region: "WA".to_string(),
                postal_code: "98402".to_string(),
                country: "US".to_string(),
            },
        },
    }
}
