use crate::domain::status::CustomerStatus;
use crate::domain::validate;
use crate::error::{Error, FieldError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address of a controlling person, in the shape the processor
/// expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerAddress {
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state_province_region: String,
    pub postal_code: String,
    pub country: String,
}

impl OwnerAddress {
    fn validate_into(&self, errors: &mut Vec<FieldError>, prefix: &str) {
        validate::require(errors, &format!("{prefix}.address1"), &self.address1);
        validate::require(errors, &format!("{prefix}.city"), &self.city);
        validate::require(
            errors,
            &format!("{prefix}.stateProvinceRegion"),
            &self.state_province_region,
        );
        validate::require(errors, &format!("{prefix}.postalCode"), &self.postal_code);
        validate::require(errors, &format!("{prefix}.country"), &self.country);
    }
}

/// Identity of a natural person disclosed as a controlling party. Used both
/// for the company controller and for beneficial owners. Date of birth and
/// SSN are submitted to the processor but never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerIdentity {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub date_of_birth: String,
    pub ssn: String,
    pub address: OwnerAddress,
}

impl OwnerIdentity {
    pub(crate) fn validate_into(&self, errors: &mut Vec<FieldError>, prefix: &str) {
        validate::require(errors, &format!("{prefix}.firstName"), &self.first_name);
        validate::require(errors, &format!("{prefix}.lastName"), &self.last_name);
        validate::require(errors, &format!("{prefix}.title"), &self.title);
        validate::require(errors, &format!("{prefix}.dateOfBirth"), &self.date_of_birth);
        validate::require_ssn(errors, &format!("{prefix}.ssn"), &self.ssn);
        self.address.validate_into(errors, prefix);
    }
}

/// Request payload for adding or editing a beneficial owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    #[serde(flatten)]
    pub identity: OwnerIdentity,
}

impl OwnerRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.identity.validate_into(&mut errors, "owner");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// A disclosed controlling party of a tenant's business, tracked
/// independently against the processor's verification of that person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficialOwner {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub address: OwnerAddress,
    pub processor_uri: String,
    pub verification_status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BeneficialOwner {
    pub fn new(
        tenant_id: Uuid,
        identity: &OwnerIdentity,
        processor_uri: String,
        verification_status: CustomerStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            title: identity.title.clone(),
            address: identity.address.clone(),
            processor_uri,
            verification_status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merge(&mut self, identity: &OwnerIdentity, verification_status: CustomerStatus) {
        self.first_name = identity.first_name.clone();
        self.last_name = identity.last_name.clone();
        self.title = identity.title.clone();
        self.address = identity.address.clone();
        self.verification_status = verification_status;
        self.updated_at = Utc::now();
    }
}
