use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hearth_auth_types::identity::Identity;

use crate::domain::types::DailySummary;
use crate::error::HydrationError;
use crate::state::AppState;
use crate::usecase::summary::DailySummaryUseCase;

#[derive(Deserialize, Default)]
pub struct SummaryQuery {
    /// UTC calendar day, defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub intake_count: usize,
    pub total_ml: Decimal,
    pub total_oz: Decimal,
    pub goal_ml: Option<Decimal>,
    pub progress_percent: Decimal,
    pub goal_met: bool,
}

impl From<DailySummary> for DailySummaryResponse {
    fn from(summary: DailySummary) -> Self {
        Self {
            date: summary.date,
            intake_count: summary.intake_count,
            total_ml: summary.total_ml,
            total_oz: summary.total_oz,
            goal_ml: summary.goal_ml,
            progress_percent: summary.progress_percent,
            goal_met: summary.goal_met,
        }
    }
}

// ── GET /summary ─────────────────────────────────────────────────────────────

pub async fn get_summary(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<DailySummaryResponse>, HydrationError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let usecase = DailySummaryUseCase {
        intakes: state.intake_repo(),
        goals: state.goal_repo(),
    };
    let summary = usecase
        .execute(identity.tenant_id, identity.user_id, date)
        .await?;
    Ok(Json(summary.into()))
}
