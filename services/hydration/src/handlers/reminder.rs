use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_auth_types::identity::Identity;

use crate::domain::types::Reminder;
use crate::error::HydrationError;
use crate::state::AppState;
use crate::usecase::reminder::{
    CreateReminderUseCase, DeleteReminderUseCase, GetReminderUseCase, ListRemindersUseCase,
    ReminderInput, ToggleReminderUseCase, UpdateReminderUseCase,
};

#[derive(Deserialize)]
pub struct ReminderRequest {
    pub reminder_time: NaiveTime,
    pub message: String,
    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl From<ReminderRequest> for ReminderInput {
    fn from(body: ReminderRequest) -> Self {
        Self {
            reminder_time: body.reminder_time,
            message: body.message,
            is_enabled: body.is_enabled,
        }
    }
}

#[derive(Serialize)]
pub struct ReminderResponse {
    pub id: Uuid,
    pub reminder_time: NaiveTime,
    pub message: String,
    pub is_enabled: bool,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Reminder> for ReminderResponse {
    fn from(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            reminder_time: reminder.reminder_time,
            message: reminder.message,
            is_enabled: reminder.is_enabled,
            created_at: reminder.created_at,
            updated_at: reminder.updated_at,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ReminderListQuery {
    #[serde(default)]
    pub enabled_only: bool,
}

// ── POST /reminders ──────────────────────────────────────────────────────────

pub async fn create_reminder(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ReminderRequest>,
) -> Result<(StatusCode, Json<ReminderResponse>), HydrationError> {
    let usecase = CreateReminderUseCase {
        repo: state.reminder_repo(),
    };
    let reminder = usecase
        .execute(identity.tenant_id, identity.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(reminder.into())))
}

// ── GET /reminders ───────────────────────────────────────────────────────────

pub async fn get_reminders(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ReminderListQuery>,
) -> Result<Json<Vec<ReminderResponse>>, HydrationError> {
    let usecase = ListRemindersUseCase {
        repo: state.reminder_repo(),
    };
    let reminders = usecase
        .execute(identity.tenant_id, identity.user_id, query.enabled_only)
        .await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

// ── GET /reminders/{id} ──────────────────────────────────────────────────────

pub async fn get_reminder(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReminderResponse>, HydrationError> {
    let usecase = GetReminderUseCase {
        repo: state.reminder_repo(),
    };
    let reminder = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(reminder.into()))
}

// ── PUT /reminders/{id} ──────────────────────────────────────────────────────

pub async fn update_reminder(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReminderRequest>,
) -> Result<Json<ReminderResponse>, HydrationError> {
    let usecase = UpdateReminderUseCase {
        repo: state.reminder_repo(),
    };
    let reminder = usecase
        .execute(identity.tenant_id, identity.user_id, id, body.into())
        .await?;
    Ok(Json(reminder.into()))
}

// ── POST /reminders/{id}/toggle ──────────────────────────────────────────────

pub async fn toggle_reminder(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReminderResponse>, HydrationError> {
    let usecase = ToggleReminderUseCase {
        repo: state.reminder_repo(),
    };
    let reminder = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(reminder.into()))
}

// ── DELETE /reminders/{id} ───────────────────────────────────────────────────

pub async fn delete_reminder(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HydrationError> {
    let usecase = DeleteReminderUseCase {
        repo: state.reminder_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
