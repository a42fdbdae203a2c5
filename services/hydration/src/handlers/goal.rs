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

use crate::domain::types::Goal;
use crate::error::HydrationError;
use crate::state::AppState;
use crate::usecase::goal::{
    CreateGoalUseCase, DeleteGoalUseCase, GetGoalUseCase, GoalInput, ListGoalsUseCase,
    UpdateGoalUseCase,
};

#[derive(Deserialize)]
pub struct GoalRequest {
    pub daily_goal_ml: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub notes: Option<String>,
}

fn active_by_default() -> bool {
    true
}

impl From<GoalRequest> for GoalInput {
    fn from(body: GoalRequest) -> Self {
        Self {
            daily_goal_ml: body.daily_goal_ml,
            start_date: body.start_date,
            end_date: body.end_date,
            is_active: body.is_active,
            notes: body.notes,
        }
    }
}

#[derive(Serialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub daily_goal_ml: Decimal,
    pub daily_goal_oz: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            daily_goal_ml: goal.daily_goal_ml,
            daily_goal_oz: goal.daily_goal_oz().round_dp(2),
            start_date: goal.start_date,
            end_date: goal.end_date,
            is_active: goal.is_active,
            notes: goal.notes,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

// ── POST /goals ──────────────────────────────────────────────────────────────

pub async fn create_goal(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<GoalRequest>,
) -> Result<(StatusCode, Json<GoalResponse>), HydrationError> {
    let usecase = CreateGoalUseCase {
        repo: state.goal_repo(),
    };
    let goal = usecase
        .execute(identity.tenant_id, identity.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(goal.into())))
}

// ── GET /goals ───────────────────────────────────────────────────────────────

pub async fn get_goals(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<GoalResponse>>, HydrationError> {
    let usecase = ListGoalsUseCase {
        repo: state.goal_repo(),
    };
    let goals = usecase
        .execute(identity.tenant_id, identity.user_id, page)
        .await?;
    Ok(Json(goals.into_iter().map(Into::into).collect()))
}

// ── GET /goals/{id} ──────────────────────────────────────────────────────────

pub async fn get_goal(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalResponse>, HydrationError> {
    let usecase = GetGoalUseCase {
        repo: state.goal_repo(),
    };
    let goal = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(goal.into()))
}

// ── PUT /goals/{id} ──────────────────────────────────────────────────────────

pub async fn update_goal(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<GoalResponse>, HydrationError> {
    let usecase = UpdateGoalUseCase {
        repo: state.goal_repo(),
    };
    let goal = usecase
        .execute(identity.tenant_id, identity.user_id, id, body.into())
        .await?;
    Ok(Json(goal.into()))
}

// ── DELETE /goals/{id} ───────────────────────────────────────────────────────

pub async fn delete_goal(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HydrationError> {
    let usecase = DeleteGoalUseCase {
        repo: state.goal_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
