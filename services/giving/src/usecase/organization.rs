use chrono::Utc;
use uuid::Uuid;

use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{OrganizationDeleted, OrganizationSaved, outbox};
use crate::domain::repository::OrganizationRepository;
use crate::domain::types::{
    ADDRESS_MAX, EIN_MAX, NAME_MAX, NOTES_MAX, Organization, WEBSITE_MAX, optional_text, text,
};
use crate::error::GivingError;

pub struct OrganizationInput {
    pub name: String,
    pub ein: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub is_501c3: bool,
    pub notes: Option<String>,
}

struct ValidOrganization {
    name: String,
    ein: Option<String>,
    address: Option<String>,
    website: Option<String>,
    notes: Option<String>,
}

fn validate(input: &OrganizationInput) -> Result<ValidOrganization, GivingError> {
    Ok(ValidOrganization {
        name: text("name", &input.name, NAME_MAX)?,
        ein: optional_text("ein", input.ein.as_deref(), EIN_MAX)?,
        address: optional_text("address", input.address.as_deref(), ADDRESS_MAX)?,
        website: optional_text("website", input.website.as_deref(), WEBSITE_MAX)?,
        notes: optional_text("notes", input.notes.as_deref(), NOTES_MAX)?,
    })
}

// ── CreateOrganization ───────────────────────────────────────────────────────

pub struct CreateOrganizationUseCase<R: OrganizationRepository> {
    pub repo: R,
}

impl<R: OrganizationRepository> CreateOrganizationUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        input: OrganizationInput,
    ) -> Result<Organization, GivingError> {
        let valid = validate(&input)?;
        let now = Utc::now();
        let organization = Organization {
            id: Uuid::now_v7(),
            tenant_id,
            name: valid.name,
            ein: valid.ein,
            address: valid.address,
            website: valid.website,
            is_501c3: input.is_501c3,
            notes: valid.notes,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &OrganizationSaved::new(&organization, true))?;
        self.repo.create(&organization, &event).await?;
        Ok(organization)
    }
}

// ── ListOrganizations ────────────────────────────────────────────────────────

pub struct ListOrganizationsUseCase<R: OrganizationRepository> {
    pub repo: R,
}

impl<R: OrganizationRepository> ListOrganizationsUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<Vec<Organization>, GivingError> {
        self.repo.list(tenant_id, page.clamped()).await
    }
}

// ── GetOrganization ──────────────────────────────────────────────────────────

pub struct GetOrganizationUseCase<R: OrganizationRepository> {
    pub repo: R,
}

impl<R: OrganizationRepository> GetOrganizationUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<Organization, GivingError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GivingError::OrganizationNotFound)
    }
}

// ── UpdateOrganization ───────────────────────────────────────────────────────

pub struct UpdateOrganizationUseCase<R: OrganizationRepository> {
    pub repo: R,
}

impl<R: OrganizationRepository> UpdateOrganizationUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        input: OrganizationInput,
    ) -> Result<Organization, GivingError> {
        let valid = validate(&input)?;
        let mut organization = self
            .repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GivingError::OrganizationNotFound)?;

        organization.name = valid.name;
        organization.ein = valid.ein;
        organization.address = valid.address;
        organization.website = valid.website;
        organization.is_501c3 = input.is_501c3;
        organization.notes = valid.notes;
        organization.updated_at = Utc::now();

        let event = outbox(tenant_id, &OrganizationSaved::new(&organization, false))?;
        self.repo.update(&organization, &event).await?;
        Ok(organization)
    }
}

// ── DeleteOrganization ───────────────────────────────────────────────────────

pub struct DeleteOrganizationUseCase<R: OrganizationRepository> {
    pub repo: R,
}

impl<R: OrganizationRepository> DeleteOrganizationUseCase<R> {
    /// Refused while donations still point at the organization.
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<(), GivingError> {
        if self.repo.has_donations(tenant_id, id).await? {
            return Err(GivingError::OrganizationHasDonations);
        }
        let event = outbox(
            tenant_id,
            &OrganizationDeleted {
                event_id: Uuid::now_v7(),
                organization_id: id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, id, &event).await? {
            return Err(GivingError::OrganizationNotFound);
        }
        Ok(())
    }
}
