use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_auth_types::identity::Identity;
use hearth_domain::pagination::PageRequest;

use crate::domain::types::FillUp;
use crate::error::FuelError;
use crate::state::AppState;
use crate::usecase::fill_up::{
    DeleteFillUpUseCase, FillUpInput, GetFillUpUseCase, ListFillUpsUseCase, RecordFillUpUseCase,
};

#[derive(Deserialize)]
pub struct FillUpRequest {
    pub fill_up_date: Option<DateTime<Utc>>,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub price_per_gallon: Decimal,
    #[serde(default = "full_tank_by_default")]
    pub is_full_tank: bool,
    pub fuel_grade: Option<String>,
    pub gas_station: Option<String>,
    pub notes: Option<String>,
}

fn full_tank_by_default() -> bool {
    true
}

impl From<FillUpRequest> for FillUpInput {
    fn from(body: FillUpRequest) -> Self {
        Self {
            fill_up_date: body.fill_up_date,
            odometer: body.odometer,
            gallons: body.gallons,
            price_per_gallon: body.price_per_gallon,
            is_full_tank: body.is_full_tank,
            fuel_grade: body.fuel_grade,
            gas_station: body.gas_station,
            notes: body.notes,
        }
    }
}

#[derive(Serialize)]
pub struct FillUpResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub fill_up_date: DateTime<Utc>,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub price_per_gallon: Decimal,
    pub total_cost: Decimal,
    pub is_full_tank: bool,
    pub fuel_grade: Option<String>,
    pub gas_station: Option<String>,
    pub miles_per_gallon: Option<Decimal>,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<FillUp> for FillUpResponse {
    fn from(fill_up: FillUp) -> Self {
        Self {
            id: fill_up.id,
            vehicle_id: fill_up.vehicle_id,
            fill_up_date: fill_up.fill_up_date,
            odometer: fill_up.odometer,
            gallons: fill_up.gallons,
            price_per_gallon: fill_up.price_per_gallon,
            total_cost: fill_up.total_cost,
            is_full_tank: fill_up.is_full_tank,
            fuel_grade: fill_up.fuel_grade,
            gas_station: fill_up.gas_station,
            miles_per_gallon: fill_up.miles_per_gallon,
            notes: fill_up.notes,
            created_at: fill_up.created_at,
        }
    }
}

// ── POST /vehicles/{id}/fill-ups ─────────────────────────────────────────────

pub async fn record_fill_up(
    identity: Identity,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(body): Json<FillUpRequest>,
) -> Result<(StatusCode, Json<FillUpResponse>), FuelError> {
    let usecase = RecordFillUpUseCase {
        vehicles: state.vehicle_repo(),
        fill_ups: state.fill_up_repo(),
    };
    let fill_up = usecase
        .execute(identity.tenant_id, identity.user_id, vehicle_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(fill_up.into())))
}

// ── GET /vehicles/{id}/fill-ups ──────────────────────────────────────────────

pub async fn get_fill_ups(
    identity: Identity,
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<FillUpResponse>>, FuelError> {
    let usecase = ListFillUpsUseCase {
        vehicles: state.vehicle_repo(),
        fill_ups: state.fill_up_repo(),
    };
    let fill_ups = usecase
        .execute(identity.tenant_id, identity.user_id, vehicle_id, page)
        .await?;
    Ok(Json(fill_ups.into_iter().map(Into::into).collect()))
}

// ── GET /fill-ups/{id} ───────────────────────────────────────────────────────

pub async fn get_fill_up(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FillUpResponse>, FuelError> {
    let usecase = GetFillUpUseCase {
        repo: state.fill_up_repo(),
    };
    let fill_up = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(fill_up.into()))
}

// ── DELETE /fill-ups/{id} ────────────────────────────────────────────────────

pub async fn delete_fill_up(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, FuelError> {
    let usecase = DeleteFillUpUseCase {
        repo: state.fill_up_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
