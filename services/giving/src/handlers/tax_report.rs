use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_core::tenant::TenantContext;
use hearth_domain::pagination::PageRequest;

use crate::domain::types::TaxReport;
use crate::error::GivingError;
use crate::state::AppState;
use crate::usecase::tax_report::{
    DeleteTaxReportUseCase, GenerateTaxReportUseCase, GetTaxReportByYearUseCase,
    GetTaxReportUseCase, ListTaxReportsUseCase,
};

#[derive(Deserialize, Default)]
pub struct GenerateTaxReportRequest {
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct TaxReportResponse {
    pub id: Uuid,
    pub tax_year: i32,
    pub total_cash_donations: Decimal,
    pub total_non_cash_donations: Decimal,
    pub total_deductible_amount: Decimal,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub generated_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<TaxReport> for TaxReportResponse {
    fn from(report: TaxReport) -> Self {
        Self {
            id: report.id,
            tax_year: report.tax_year,
            total_cash_donations: report.totals.total_cash_donations,
            total_non_cash_donations: report.totals.total_non_cash_donations,
            total_deductible_amount: report.total_deductible_amount(),
            generated_date: report.generated_date,
            notes: report.notes,
        }
    }
}

// ── POST /tax-reports/{year} ─────────────────────────────────────────────────

pub async fn generate_tax_report(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(year): Path<i32>,
    body: Option<Json<GenerateTaxReportRequest>>,
) -> Result<(StatusCode, Json<TaxReportResponse>), GivingError> {
    let Json(body) = body.unwrap_or_default();
    let usecase = GenerateTaxReportUseCase {
        donations: state.donation_repo(),
        reports: state.tax_report_repo(),
    };
    let report = usecase.execute(tenant.tenant_id, year, body.notes).await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

// ── GET /tax-reports ─────────────────────────────────────────────────────────

pub async fn get_tax_reports(
    tenant: TenantContext,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<TaxReportResponse>>, GivingError> {
    let usecase = ListTaxReportsUseCase {
        repo: state.tax_report_repo(),
    };
    let reports = usecase.execute(tenant.tenant_id, page).await?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

// ── GET /tax-reports/year/{year} ─────────────────────────────────────────────

pub async fn get_tax_report_by_year(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<TaxReportResponse>, GivingError> {
    let usecase = GetTaxReportByYearUseCase {
        repo: state.tax_report_repo(),
    };
    let report = usecase.execute(tenant.tenant_id, year).await?;
    Ok(Json(report.into()))
}

// ── GET /tax-reports/{id} ────────────────────────────────────────────────────

pub async fn get_tax_report(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaxReportResponse>, GivingError> {
    let usecase = GetTaxReportUseCase {
        repo: state.tax_report_repo(),
    };
    let report = usecase.execute(tenant.tenant_id, id).await?;
    Ok(Json(report.into()))
}

// ── DELETE /tax-reports/{id} ─────────────────────────────────────────────────

pub async fn delete_tax_report(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GivingError> {
    let usecase = DeleteTaxReportUseCase {
        repo: state.tax_report_repo(),
    };
    usecase.execute(tenant.tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
