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
use hearth_domain::pagination::{DEFAULT_PER_PAGE, PageRequest};

use crate::domain::types::Vehicle;
use crate::error::FuelError;
use crate::state::AppState;
use crate::usecase::vehicle::{
    CreateVehicleUseCase, DeleteVehicleUseCase, GetVehicleUseCase, ListVehiclesUseCase,
    SetVehicleActiveUseCase, UpdateVehicleUseCase, VehicleDetails, VehicleInput,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub tank_capacity: Option<Decimal>,
    pub epa_city_mpg: Option<Decimal>,
    pub epa_highway_mpg: Option<Decimal>,
}

impl From<VehicleRequest> for VehicleInput {
    fn from(body: VehicleRequest) -> Self {
        Self {
            make: body.make,
            model: body.model,
            year: body.year,
            vin: body.vin,
            license_plate: body.license_plate,
            tank_capacity: body.tank_capacity,
            epa_city_mpg: body.epa_city_mpg,
            epa_highway_mpg: body.epa_highway_mpg,
        }
    }
}

#[derive(Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub tank_capacity: Option<Decimal>,
    pub epa_city_mpg: Option<Decimal>,
    pub epa_highway_mpg: Option<Decimal>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_up_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_mpg: Option<Decimal>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            license_plate: vehicle.license_plate,
            tank_capacity: vehicle.tank_capacity,
            epa_city_mpg: vehicle.epa_city_mpg,
            epa_highway_mpg: vehicle.epa_highway_mpg,
            is_active: vehicle.is_active,
            fill_up_count: None,
            overall_mpg: None,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

impl From<VehicleDetails> for VehicleResponse {
    fn from(details: VehicleDetails) -> Self {
        Self {
            fill_up_count: Some(details.fill_up_count),
            overall_mpg: details.overall_mpg,
            ..VehicleResponse::from(details.vehicle)
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct VehicleListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    #[serde(default)]
    pub include_inactive: bool,
}

// ── POST /vehicles ───────────────────────────────────────────────────────────

pub async fn create_vehicle(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), FuelError> {
    let usecase = CreateVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicle = usecase
        .execute(identity.tenant_id, identity.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

// ── GET /vehicles ────────────────────────────────────────────────────────────

pub async fn get_vehicles(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<Vec<VehicleResponse>>, FuelError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListVehiclesUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicles = usecase
        .execute(
            identity.tenant_id,
            identity.user_id,
            query.include_inactive,
            page,
        )
        .await?;
    Ok(Json(vehicles.into_iter().map(Into::into).collect()))
}

// ── GET /vehicles/{id} ───────────────────────────────────────────────────────

pub async fn get_vehicle(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, FuelError> {
    let usecase = GetVehicleUseCase {
        vehicles: state.vehicle_repo(),
        fill_ups: state.fill_up_repo(),
    };
    let details = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(details.into()))
}

// ── PUT /vehicles/{id} ───────────────────────────────────────────────────────

pub async fn update_vehicle(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VehicleRequest>,
) -> Result<Json<VehicleResponse>, FuelError> {
    let usecase = UpdateVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicle = usecase
        .execute(identity.tenant_id, identity.user_id, id, body.into())
        .await?;
    Ok(Json(vehicle.into()))
}

// ── POST /vehicles/{id}/deactivate ───────────────────────────────────────────

pub async fn deactivate_vehicle(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, FuelError> {
    set_active(identity, state, id, false).await
}

// ── POST /vehicles/{id}/reactivate ───────────────────────────────────────────

pub async fn reactivate_vehicle(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, FuelError> {
    set_active(identity, state, id, true).await
}

async fn set_active(
    identity: Identity,
    state: AppState,
    id: Uuid,
    active: bool,
) -> Result<Json<VehicleResponse>, FuelError> {
    let usecase = SetVehicleActiveUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicle = usecase
        .execute(identity.tenant_id, identity.user_id, id, active)
        .await?;
    Ok(Json(vehicle.into()))
}

// ── DELETE /vehicles/{id} ────────────────────────────────────────────────────

pub async fn delete_vehicle(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, FuelError> {
    let usecase = DeleteVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
