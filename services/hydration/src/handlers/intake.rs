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

use crate::domain::types::{BeverageType, Intake, IntakeFilter, IntakeSortBy};
use crate::error::HydrationError;
use crate::state::AppState;
use crate::usecase::intake::{
    CreateIntakeUseCase, DeleteIntakeUseCase, GetIntakeUseCase, IntakeInput, ListIntakesUseCase,
    UpdateIntakeUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IntakeRequest {
    pub beverage_type: BeverageType,
    pub amount_ml: Decimal,
    pub intake_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<IntakeRequest> for IntakeInput {
    fn from(body: IntakeRequest) -> Self {
        Self {
            beverage_type: body.beverage_type,
            amount_ml: body.amount_ml,
            intake_time: body.intake_time,
            notes: body.notes,
        }
    }
}

#[derive(Serialize)]
pub struct IntakeResponse {
    pub id: Uuid,
    pub beverage_type: BeverageType,
    pub amount_ml: Decimal,
    pub amount_oz: Decimal,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub intake_time: DateTime<Utc>,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Intake> for IntakeResponse {
    fn from(intake: Intake) -> Self {
        Self {
            id: intake.id,
            beverage_type: intake.beverage_type,
            amount_ml: intake.amount_ml,
            amount_oz: intake.amount_oz().round_dp(2),
            intake_time: intake.intake_time,
            notes: intake.notes,
            created_at: intake.created_at,
            updated_at: intake.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct IntakeListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub beverage_type: Option<BeverageType>,
    pub sort_by: Option<String>,
}

// ── POST /intakes ────────────────────────────────────────────────────────────

pub async fn create_intake(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<IntakeRequest>,
) -> Result<(StatusCode, Json<IntakeResponse>), HydrationError> {
    let usecase = CreateIntakeUseCase {
        repo: state.intake_repo(),
    };
    let intake = usecase
        .execute(identity.tenant_id, identity.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(intake.into())))
}

// ── GET /intakes ─────────────────────────────────────────────────────────────

pub async fn get_intakes(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<IntakeListQuery>,
) -> Result<Json<Vec<IntakeResponse>>, HydrationError> {
    let sort_by = query
        .sort_by
        .as_deref()
        .and_then(IntakeSortBy::from_kebab_case)
        .unwrap_or_default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        page: query.page.unwrap_or(1),
    };
    let filter = IntakeFilter {
        from: query.from,
        to: query.to,
        beverage_type: query.beverage_type,
    };

    let usecase = ListIntakesUseCase {
        repo: state.intake_repo(),
    };
    let intakes = usecase
        .execute(identity.tenant_id, identity.user_id, filter, sort_by, page)
        .await?;
    Ok(Json(intakes.into_iter().map(Into::into).collect()))
}

// ── GET /intakes/{id} ────────────────────────────────────────────────────────

pub async fn get_intake(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeResponse>, HydrationError> {
    let usecase = GetIntakeUseCase {
        repo: state.intake_repo(),
    };
    let intake = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(intake.into()))
}

// ── PUT /intakes/{id} ────────────────────────────────────────────────────────

pub async fn update_intake(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<IntakeRequest>,
) -> Result<Json<IntakeResponse>, HydrationError> {
    let usecase = UpdateIntakeUseCase {
        repo: state.intake_repo(),
    };
    let intake = usecase
        .execute(identity.tenant_id, identity.user_id, id, body.into())
        .await?;
    Ok(Json(intake.into()))
}

// ── DELETE /intakes/{id} ─────────────────────────────────────────────────────

pub async fn delete_intake(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HydrationError> {
    let usecase = DeleteIntakeUseCase {
        repo: state.intake_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
