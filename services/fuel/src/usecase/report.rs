use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{ReportDeleted, ReportGenerated, outbox};
use crate::domain::repository::{FillUpRepository, ReportRepository, VehicleRepository};
use crate::domain::types::{
    EfficiencyReport, NOTES_MAX, ReportTotals, date_range_bounds, distance_covered,
    optional_text, validate_date_range,
};
use crate::error::FuelError;

pub struct GenerateReportInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

// ── GenerateReport ───────────────────────────────────────────────────────────

pub struct GenerateReportUseCase<V: VehicleRepository, F: FillUpRepository, R: ReportRepository>
{
    pub vehicles: V,
    pub fill_ups: F,
    pub reports: R,
}

impl<V, F, R> GenerateReportUseCase<V, F, R>
where
    V: VehicleRepository,
    F: FillUpRepository,
    R: ReportRepository,
{
    /// Summarise the fill-ups dated within `start_date..=end_date`.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        input: GenerateReportInput,
    ) -> Result<EfficiencyReport, FuelError> {
        validate_date_range(input.start_date, input.end_date)?;
        let notes = optional_text("notes", input.notes.as_deref(), NOTES_MAX)?;
        let vehicle = self
            .vehicles
            .find_by_id(tenant_id, user_id, vehicle_id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;

        let (from, to) = date_range_bounds(input.start_date, input.end_date);
        let fill_ups = self
            .fill_ups
            .list_between(tenant_id, user_id, vehicle.id, from, to)
            .await?;
        let totals = ReportTotals::generate(distance_covered(&fill_ups), &fill_ups)?;

        let report = EfficiencyReport {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            vehicle_id: vehicle.id,
            start_date: input.start_date,
            end_date: input.end_date,
            totals,
            notes,
            created_at: Utc::now(),
        };
        let event = outbox(tenant_id, &ReportGenerated::new(&report))?;
        self.reports.create(&report, &event).await?;
        Ok(report)
    }
}

// ── ListReports ──────────────────────────────────────────────────────────────

pub struct ListReportsUseCase<V: VehicleRepository, R: ReportRepository> {
    pub vehicles: V,
    pub reports: R,
}

impl<V: VehicleRepository, R: ReportRepository> ListReportsUseCase<V, R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<EfficiencyReport>, FuelError> {
        self.vehicles
            .find_by_id(tenant_id, user_id, vehicle_id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;
        self.reports
            .list_for_vehicle(tenant_id, user_id, vehicle_id, page.clamped())
            .await
    }
}

// ── GetReport ────────────────────────────────────────────────────────────────

pub struct GetReportUseCase<R: ReportRepository> {
    pub repo: R,
}

impl<R: ReportRepository> GetReportUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<EfficiencyReport, FuelError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(FuelError::ReportNotFound)
    }
}

// ── DeleteReport ─────────────────────────────────────────────────────────────

pub struct DeleteReportUseCase<R: ReportRepository> {
    pub repo: R,
}

impl<R: ReportRepository> DeleteReportUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), FuelError> {
        let event = outbox(
            tenant_id,
            &ReportDeleted {
                event_id: Uuid::now_v7(),
                report_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(FuelError::ReportNotFound);
        }
        Ok(())
    }
}
