use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{DonationDeleted, DonationSaved, outbox};
use crate::domain::repository::{DonationRepository, OrganizationRepository};
use crate::domain::types::{
    Donation, DonationFilter, DonationType, NOTES_MAX, RECEIPT_MAX, optional_text,
    validate_amount, validate_tax_year,
};
use crate::error::GivingError;

pub struct DonationInput {
    pub organization_id: Uuid,
    pub amount: Decimal,
    pub donation_date: NaiveDate,
    pub donation_type: DonationType,
    pub receipt_number: Option<String>,
    pub is_tax_deductible: bool,
    pub notes: Option<String>,
}

struct ValidDonation {
    amount: Decimal,
    receipt_number: Option<String>,
    notes: Option<String>,
}

fn validate(input: &DonationInput) -> Result<ValidDonation, GivingError> {
    Ok(ValidDonation {
        amount: validate_amount("amount", input.amount)?,
        receipt_number: optional_text(
            "receipt_number",
            input.receipt_number.as_deref(),
            RECEIPT_MAX,
        )?,
        notes: optional_text("notes", input.notes.as_deref(), NOTES_MAX)?,
    })
}

async fn require_organization<O: OrganizationRepository>(
    organizations: &O,
    tenant_id: TenantId,
    id: Uuid,
) -> Result<(), GivingError> {
    organizations
        .find_by_id(tenant_id, id)
        .await?
        .ok_or(GivingError::OrganizationNotFound)?;
    Ok(())
}

// ── CreateDonation ───────────────────────────────────────────────────────────

pub struct CreateDonationUseCase<O: OrganizationRepository, D: DonationRepository> {
    pub organizations: O,
    pub donations: D,
}

impl<O: OrganizationRepository, D: DonationRepository> CreateDonationUseCase<O, D> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        input: DonationInput,
    ) -> Result<Donation, GivingError> {
        let valid = validate(&input)?;
        require_organization(&self.organizations, tenant_id, input.organization_id).await?;

        let now = Utc::now();
        let donation = Donation {
            id: Uuid::now_v7(),
            tenant_id,
            organization_id: input.organization_id,
            amount: valid.amount,
            donation_date: input.donation_date,
            donation_type: input.donation_type,
            receipt_number: valid.receipt_number,
            is_tax_deductible: input.is_tax_deductible,
            notes: valid.notes,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &DonationSaved::new(&donation, true))?;
        self.donations.create(&donation, &event).await?;
        Ok(donation)
    }
}

// ── ListDonations ────────────────────────────────────────────────────────────

pub struct ListDonationsUseCase<D: DonationRepository> {
    pub repo: D,
}

impl<D: DonationRepository> ListDonationsUseCase<D> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        filter: DonationFilter,
        page: PageRequest,
    ) -> Result<Vec<Donation>, GivingError> {
        if let Some(year) = filter.year {
            validate_tax_year(year)?;
        }
        self.repo.list(tenant_id, filter, page.clamped()).await
    }
}

// ── GetDonation ──────────────────────────────────────────────────────────────

pub struct GetDonationUseCase<D: DonationRepository> {
    pub repo: D,
}

impl<D: DonationRepository> GetDonationUseCase<D> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<Donation, GivingError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GivingError::DonationNotFound)
    }
}

// ── UpdateDonation ───────────────────────────────────────────────────────────

pub struct UpdateDonationUseCase<O: OrganizationRepository, D: DonationRepository> {
    pub organizations: O,
    pub donations: D,
}

impl<O: OrganizationRepository, D: DonationRepository> UpdateDonationUseCase<O, D> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        input: DonationInput,
    ) -> Result<Donation, GivingError> {
        let valid = validate(&input)?;
        let mut donation = self
            .donations
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GivingError::DonationNotFound)?;
        if donation.organization_id != input.organization_id {
            require_organization(&self.organizations, tenant_id, input.organization_id).await?;
        }

        donation.organization_id = input.organization_id;
        donation.amount = valid.amount;
        donation.donation_date = input.donation_date;
        donation.donation_type = input.donation_type;
        donation.receipt_number = valid.receipt_number;
        donation.is_tax_deductible = input.is_tax_deductible;
        donation.notes = valid.notes;
        donation.updated_at = Utc::now();

        let event = outbox(tenant_id, &DonationSaved::new(&donation, false))?;
        self.donations.update(&donation, &event).await?;
        Ok(donation)
    }
}

// ── DeleteDonation ───────────────────────────────────────────────────────────

pub struct DeleteDonationUseCase<D: DonationRepository> {
    pub repo: D,
}

impl<D: DonationRepository> DeleteDonationUseCase<D> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<(), GivingError> {
        let event = outbox(
            tenant_id,
            &DonationDeleted {
                event_id: Uuid::now_v7(),
                donation_id: id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, id, &event).await? {
            return Err(GivingError::DonationNotFound);
        }
        Ok(())
    }
}
