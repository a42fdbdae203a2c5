use chrono::Utc;
use uuid::Uuid;

use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{TaxReportDeleted, TaxReportGenerated, outbox};
use crate::domain::repository::{DonationRepository, TaxReportRepository};
use crate::domain::types::{NOTES_MAX, TaxReport, TaxTotals, optional_text, validate_tax_year};
use crate::error::GivingError;

// ── GenerateTaxReport ────────────────────────────────────────────────────────

pub struct GenerateTaxReportUseCase<D: DonationRepository, T: TaxReportRepository> {
    pub donations: D,
    pub reports: T,
}

/// Concurrent generations for one year settle on a single stored row within this
/// many attempts.
const SAVE_ATTEMPTS: usize = 3;

impl<D: DonationRepository, T: TaxReportRepository> GenerateTaxReportUseCase<D, T> {
    /// Total the year's tax-deductible donations. A report already stored for the
    /// year is overwritten in place and keeps its id.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        tax_year: i32,
        notes: Option<String>,
    ) -> Result<TaxReport, GivingError> {
        validate_tax_year(tax_year)?;
        let notes = optional_text("notes", notes.as_deref(), NOTES_MAX)?;

        let donations = self.donations.all_in_year(tenant_id, tax_year).await?;
        let totals = TaxTotals::generate(tax_year, &donations)?;

        for _ in 0..SAVE_ATTEMPTS {
            let existing = self.reports.find_by_year(tenant_id, tax_year).await?;
            let replaced = existing.is_some();
            let report = TaxReport {
                id: existing.map_or_else(Uuid::now_v7, |r| r.id),
                tenant_id,
                tax_year,
                totals,
                generated_date: Utc::now(),
                notes: notes.clone(),
            };
            let event = outbox(tenant_id, &TaxReportGenerated::new(&report, replaced))?;
            if !self.reports.save(&report, &event).await? {
                tracing::debug!(tax_year, "tax report stored concurrently, reloading");
                continue;
            }
            tracing::info!(
                tax_year,
                replaced,
                donations = donations.len(),
                "tax report generated"
            );
            return Ok(report);
        }
        Err(anyhow::anyhow!("tax report for {tax_year} kept changing during generation").into())
    }
}

// ── ListTaxReports ───────────────────────────────────────────────────────────

pub struct ListTaxReportsUseCase<T: TaxReportRepository> {
    pub repo: T,
}

impl<T: TaxReportRepository> ListTaxReportsUseCase<T> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<Vec<TaxReport>, GivingError> {
        self.repo.list(tenant_id, page.clamped()).await
    }
}

// ── GetTaxReport ─────────────────────────────────────────────────────────────

pub struct GetTaxReportUseCase<T: TaxReportRepository> {
    pub repo: T,
}

impl<T: TaxReportRepository> GetTaxReportUseCase<T> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<TaxReport, GivingError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GivingError::TaxReportNotFound)
    }
}

// ── GetTaxReportByYear ───────────────────────────────────────────────────────

pub struct GetTaxReportByYearUseCase<T: TaxReportRepository> {
    pub repo: T,
}

impl<T: TaxReportRepository> GetTaxReportByYearUseCase<T> {
    pub async fn execute(&self, tenant_id: TenantId, tax_year: i32) -> Result<TaxReport, GivingError> {
        validate_tax_year(tax_year)?;
        self.repo
            .find_by_year(tenant_id, tax_year)
            .await?
            .ok_or(GivingError::TaxReportNotFound)
    }
}

// ── DeleteTaxReport ──────────────────────────────────────────────────────────

pub struct DeleteTaxReportUseCase<T: TaxReportRepository> {
    pub repo: T,
}

impl<T: TaxReportRepository> DeleteTaxReportUseCase<T> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<(), GivingError> {
        let event = outbox(
            tenant_id,
            &TaxReportDeleted {
                event_id: Uuid::now_v7(),
                tax_report_id: id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, id, &event).await? {
            return Err(GivingError::TaxReportNotFound);
        }
        Ok(())
    }
}
