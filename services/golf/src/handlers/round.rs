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
use hearth_domain::pagination::{DEFAULT_PER_PAGE, PageRequest};

use crate::domain::types::{HoleOutcome, HoleScore, Round, Scorecard, ScorecardStats};
use crate::error::GolfError;
use crate::state::AppState;
use crate::usecase::hole::{DeleteHoleScoreUseCase, HoleScoreInput, RecordHoleScoreUseCase};
use crate::usecase::round::{
    CreateRoundInput, CreateRoundUseCase, DeleteRoundUseCase, GetScorecardUseCase,
    ListRoundsUseCase, UpdateRoundInput, UpdateRoundUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoundRequest {
    pub course_id: Uuid,
    pub played_date: NaiveDate,
    pub total_score: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRoundRequest {
    pub played_date: NaiveDate,
    pub weather: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct HoleScoreRequest {
    pub par: i32,
    pub score: i32,
    pub putts: Option<i32>,
    #[serde(default)]
    pub fairway_hit: bool,
    #[serde(default)]
    pub green_in_regulation: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RoundListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub course_id: Option<Uuid>,
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RoundResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub played_date: NaiveDate,
    pub total_score: i32,
    pub total_par: i32,
    pub score_to_par: i32,
    pub weather: Option<String>,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Round> for RoundResponse {
    fn from(round: Round) -> Self {
        Self {
            id: round.id,
            course_id: round.course_id,
            played_date: round.played_date,
            total_score: round.total_score,
            total_par: round.total_par,
            score_to_par: round.score_to_par(),
            weather: round.weather,
            notes: round.notes,
            created_at: round.created_at,
            updated_at: round.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct HoleScoreResponse {
    pub hole_number: i32,
    pub par: i32,
    pub score: i32,
    pub score_to_par: i32,
    pub outcome: HoleOutcome,
    pub putts: Option<i32>,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
}

impl From<HoleScore> for HoleScoreResponse {
    fn from(hole: HoleScore) -> Self {
        Self {
            hole_number: hole.hole_number,
            par: hole.par,
            score: hole.score,
            score_to_par: hole.score_to_par(),
            outcome: hole.outcome(),
            putts: hole.putts,
            fairway_hit: hole.fairway_hit,
            green_in_regulation: hole.green_in_regulation,
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_par: i32,
    pub total_score: i32,
    pub total_putts: i32,
    pub fairway_hits: i32,
    pub greens_in_regulation: i32,
    pub fairway_hit_percentage: Decimal,
    pub gir_percentage: Decimal,
    pub average_putts: Option<Decimal>,
}

impl From<ScorecardStats> for StatsResponse {
    fn from(stats: ScorecardStats) -> Self {
        Self {
            total_par: stats.total_par,
            total_score: stats.total_score,
            total_putts: stats.total_putts,
            fairway_hits: stats.fairway_hits,
            greens_in_regulation: stats.greens_in_regulation,
            fairway_hit_percentage: stats.fairway_hit_percentage,
            gir_percentage: stats.gir_percentage,
            average_putts: stats.average_putts,
        }
    }
}

#[derive(Serialize)]
pub struct ScorecardResponse {
    pub round: RoundResponse,
    pub course_name: String,
    pub number_of_holes: i32,
    pub holes: Vec<HoleScoreResponse>,
    pub stats: StatsResponse,
}

impl From<Scorecard> for ScorecardResponse {
    fn from(card: Scorecard) -> Self {
        Self {
            round: card.round.into(),
            course_name: card.course.name,
            number_of_holes: card.course.number_of_holes,
            holes: card.holes.into_iter().map(Into::into).collect(),
            stats: card.stats.into(),
        }
    }
}

// ── POST /rounds ─────────────────────────────────────────────────────────────

pub async fn create_round(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateRoundRequest>,
) -> Result<(StatusCode, Json<RoundResponse>), GolfError> {
    let usecase = CreateRoundUseCase {
        courses: state.course_repo(),
        rounds: state.round_repo(),
    };
    let input = CreateRoundInput {
        course_id: body.course_id,
        played_date: body.played_date,
        total_score: body.total_score,
        weather: body.weather,
        notes: body.notes,
    };
    let round = usecase
        .execute(identity.tenant_id, identity.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(round.into())))
}

// ── GET /rounds ──────────────────────────────────────────────────────────────

pub async fn get_rounds(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<RoundListQuery>,
) -> Result<Json<Vec<RoundResponse>>, GolfError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListRoundsUseCase {
        repo: state.round_repo(),
    };
    let rounds = usecase
        .execute(identity.tenant_id, identity.user_id, query.course_id, page)
        .await?;
    Ok(Json(rounds.into_iter().map(Into::into).collect()))
}

// ── GET /rounds/{id} ─────────────────────────────────────────────────────────

pub async fn get_scorecard(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScorecardResponse>, GolfError> {
    let usecase = GetScorecardUseCase {
        courses: state.course_repo(),
        rounds: state.round_repo(),
    };
    let card = usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(Json(card.into()))
}

// ── PUT /rounds/{id} ─────────────────────────────────────────────────────────

pub async fn update_round(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRoundRequest>,
) -> Result<Json<RoundResponse>, GolfError> {
    let usecase = UpdateRoundUseCase {
        repo: state.round_repo(),
    };
    let input = UpdateRoundInput {
        played_date: body.played_date,
        weather: body.weather,
        notes: body.notes,
    };
    let round = usecase
        .execute(identity.tenant_id, identity.user_id, id, input)
        .await?;
    Ok(Json(round.into()))
}

// ── DELETE /rounds/{id} ──────────────────────────────────────────────────────

pub async fn delete_round(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GolfError> {
    let usecase = DeleteRoundUseCase {
        repo: state.round_repo(),
    };
    usecase
        .execute(identity.tenant_id, identity.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /rounds/{id}/holes/{hole_number} ─────────────────────────────────────

pub async fn record_hole_score(
    identity: Identity,
    State(state): State<AppState>,
    Path((round_id, hole_number)): Path<(Uuid, i32)>,
    Json(body): Json<HoleScoreRequest>,
) -> Result<Json<ScorecardResponse>, GolfError> {
    let usecase = RecordHoleScoreUseCase {
        courses: state.course_repo(),
        rounds: state.round_repo(),
    };
    let input = HoleScoreInput {
        hole_number,
        par: body.par,
        score: body.score,
        putts: body.putts,
        fairway_hit: body.fairway_hit,
        green_in_regulation: body.green_in_regulation,
    };
    let card = usecase
        .execute(identity.tenant_id, identity.user_id, round_id, input)
        .await?;
    Ok(Json(card.into()))
}

// ── DELETE /rounds/{id}/holes/{hole_number} ──────────────────────────────────

pub async fn delete_hole_score(
    identity: Identity,
    State(state): State<AppState>,
    Path((round_id, hole_number)): Path<(Uuid, i32)>,
) -> Result<Json<ScorecardResponse>, GolfError> {
    let usecase = DeleteHoleScoreUseCase {
        courses: state.course_repo(),
        rounds: state.round_repo(),
    };
    let card = usecase
        .execute(identity.tenant_id, identity.user_id, round_id, hole_number)
        .await?;
    Ok(Json(card.into()))
}
