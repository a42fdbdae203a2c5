#![allow(async_fn_in_trait)]

use uuid::Uuid;

use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Donation, DonationFilter, Organization, TaxReport};
use crate::error::GivingError;

/// Repository for the charities a tenant gives to.
pub trait OrganizationRepository: Send + Sync {
    /// Ordered by name.
    async fn list(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<Vec<Organization>, GivingError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<Organization>, GivingError>;

    async fn has_donations(&self, tenant_id: TenantId, id: Uuid) -> Result<bool, GivingError>;

    async fn create(
        &self,
        organization: &Organization,
        event: &OutboxEvent,
    ) -> Result<(), GivingError>;

    async fn update(
        &self,
        organization: &Organization,
        event: &OutboxEvent,
    ) -> Result<(), GivingError>;

    /// `false` if not found.
    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError>;
}

/// Repository for donations.
pub trait DonationRepository: Send + Sync {
    /// Newest donation date first.
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: DonationFilter,
        page: PageRequest,
    ) -> Result<Vec<Donation>, GivingError>;

    /// Every donation dated in `year`, unpaged.
    async fn all_in_year(&self, tenant_id: TenantId, year: i32)
    -> Result<Vec<Donation>, GivingError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<Donation>, GivingError>;

    async fn create(&self, donation: &Donation, event: &OutboxEvent) -> Result<(), GivingError>;

    async fn update(&self, donation: &Donation, event: &OutboxEvent) -> Result<(), GivingError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError>;
}

/// Repository for yearly tax reports. At most one report per tenant and year.
pub trait TaxReportRepository: Send + Sync {
    /// Latest tax year first.
    async fn list(&self, tenant_id: TenantId, page: PageRequest)
    -> Result<Vec<TaxReport>, GivingError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<TaxReport>, GivingError>;

    async fn find_by_year(
        &self,
        tenant_id: TenantId,
        tax_year: i32,
    ) -> Result<Option<TaxReport>, GivingError>;

    /// Insert the report, or overwrite the one already stored for its year when that
    /// row has the same id.
    ///
    /// Returns `false` and writes nothing when the year holds a report with another id.
    async fn save(&self, report: &TaxReport, event: &OutboxEvent) -> Result<bool, GivingError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError>;
}
