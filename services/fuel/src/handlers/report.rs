use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_auth_types::identity::Identity;
use hearth_domain::pagination::PageRequest;

use crate::domain::types::EfficiencyReport;
use crate::error::FuelError;
use crate::state::AppState;
use crate::usecase::report::{
    DeleteReportUseCase, GenerateReportInput, GenerateReportUseCase, GetReportUseCase,
    ListReportsUseCase,
};

#[derive(Deserialize)]
pub struct GenerateReportRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

impl From<GenerateReportRequest> for GenerateReportInput {
    fn from(body: GenerateReportRequest) -> Self {
        Self {
            start_date: body.start_date,
            end_date: body.end_date,
            notes: body.notes,
        }
    }
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_miles: Decimal,
    pub total_gallons: Decimal,
    pub average_mpg: Decimal,
    pub total_fuel_cost: Decimal,
    pub cost_per_mile: Decimal,
    pub number_of_fill_ups: i32,
    pub best_mpg: Option<Decimal>,
    pub worst_mpg: Option<Decimal>,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<EfficiencyReport> for ReportResponse {
    fn from(report: EfficiencyReport) -> Self {
        let totals = report.totals;
        Self {
            id: report.id,
            vehicle_id: report.vehicle_id,
            start_date: report.start_date,
            end_date: report.end_date,
            total_miles: totals.total_miles,
            total_gallons: totals.total_gallons,
            average_mpg: totals.average_mpg,
            total_fuel_cost: totals.total_fuel_cost,
            cost_per_mile: totals.cost_per_mile,
            number_of_fill_ups: totals.number_of_fill_ups,
            best_mpg: totals.best_mpg,
            worst_mpg: totals.worst_mpg,
            notes: report.notes,
            created_at: report.created_at,
        }
    }
}

// ── POST /vehicles/{id}/reports ──────────────────────────────────────────────

pub async fn generate_report(
    identity: Identity,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(body): Json<GenerateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), FuelError> {
    let usecase = GenerateReportUseCase {
        vehicles: state.vehicle_repo(),
        fill_ups: state.fill_up_repo(),
        reports: state.report_repo(),
    };
    let report = usecase
        .execute(identity.tenant_id, identity.user_id, vehicle_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

// ── GET /vehicles/{id}/reports ───────────────────────────────────────────────

pub async fn get_reports(
    identity: Identity,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ReportResponse>>, FuelError> {
    let usecase = ListReportsUseCase {
        vehicles: state.vehicle_repo(),
        reports: state.report_repo(),
    };
    let reports = usecase
        .execute(identity.tenant_id, identity.user_id, vehicle_id, page)
        .await?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

// ── GET /reports/{id} ────────────────────────────────────────────────────────

pub async fn get_report(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, FuelError> {
    let usecase = GetReportUseCase {
        repo: state.report_repo(),
    };
    let report = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(report.into()))
}

// ── DELETE /reports/{id} ─────────────────────────────────────────────────────

pub async fn delete_report(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, FuelError> {
    let usecase = DeleteReportUseCase {
        repo: state.report_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
