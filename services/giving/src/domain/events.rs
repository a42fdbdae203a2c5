//! Integration events raised by the giving service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use hearth_domain::event::IntegrationEvent;
use hearth_domain::id::TenantId;
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Donation, DonationType, Organization, TaxReport};
use crate::error::GivingError;

pub fn outbox<E: IntegrationEvent>(tenant_id: TenantId, event: &E) -> Result<OutboxEvent, GivingError> {
    OutboxEvent::from_event(tenant_id, event).map_err(|e| GivingError::Internal(e.into()))
}

macro_rules! integration_event {
    ($ty:ty, $kind:literal, $aggregate:ident) => {
        impl IntegrationEvent for $ty {
            const KIND: &'static str = $kind;

            fn event_id(&self) -> Uuid {
                self.event_id
            }

            fn aggregate_id(&self) -> Uuid {
                self.$aggregate
            }
        }
    };
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationSaved {
    pub event_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub is_501c3: bool,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl OrganizationSaved {
    pub fn new(organization: &Organization, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            organization_id: organization.id,
            name: organization.name.clone(),
            is_501c3: organization.is_501c3,
            created,
            occurred_at: organization.updated_at,
        }
    }
}

integration_event!(OrganizationSaved, "organization.saved", organization_id);

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationDeleted {
    pub event_id: Uuid,
    pub organization_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(OrganizationDeleted, "organization.deleted", organization_id);

#[derive(Debug, Clone, Serialize)]
pub struct DonationSaved {
    pub event_id: Uuid,
    pub donation_id: Uuid,
    pub organization_id: Uuid,
    pub amount: Decimal,
    pub donation_date: NaiveDate,
    pub donation_type: DonationType,
    pub is_tax_deductible: bool,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl DonationSaved {
    pub fn new(donation: &Donation, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            donation_id: donation.id,
            organization_id: donation.organization_id,
            amount: donation.amount,
            donation_date: donation.donation_date,
            donation_type: donation.donation_type,
            is_tax_deductible: donation.is_tax_deductible,
            created,
            occurred_at: donation.updated_at,
        }
    }
}

integration_event!(DonationSaved, "donation.saved", donation_id);

#[derive(Debug, Clone, Serialize)]
pub struct DonationDeleted {
    pub event_id: Uuid,
    pub donation_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(DonationDeleted, "donation.deleted", donation_id);

/// Raised on every generation; `replaced` is set when an earlier report for the
/// year was overwritten.
#[derive(Debug, Clone, Serialize)]
pub struct TaxReportGenerated {
    pub event_id: Uuid,
    pub tax_report_id: Uuid,
    pub tax_year: i32,
    pub total_deductible_amount: Decimal,
    pub replaced: bool,
    pub occurred_at: DateTime<Utc>,
}

impl TaxReportGenerated {
    pub fn new(report: &TaxReport, replaced: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            tax_report_id: report.id,
            tax_year: report.tax_year,
            total_deductible_amount: report.total_deductible_amount(),
            replaced,
            occurred_at: report.generated_date,
        }
    }
}

integration_event!(TaxReportGenerated, "tax_report.generated", tax_report_id);

#[derive(Debug, Clone, Serialize)]
pub struct TaxReportDeleted {
    pub event_id: Uuid,
    pub tax_report_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(TaxReportDeleted, "tax_report.deleted", tax_report_id);
