use chrono::NaiveDate;

use hearth_domain::id::{TenantId, UserId};

use crate::domain::repository::{GoalRepository, IntakeRepository};
use crate::domain::types::{DailySummary, day_bounds, goal_for_date};
use crate::error::HydrationError;

// ── DailySummary ─────────────────────────────────────────────────────────────

pub struct DailySummaryUseCase<I: IntakeRepository, G: GoalRepository> {
    pub intakes: I,
    pub goals: G,
}

impl<I: IntakeRepository, G: GoalRepository> DailySummaryUseCase<I, G> {
    /// Totals for one UTC calendar day against the goal in force that day.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<DailySummary, HydrationError> {
        let (start, end) = day_bounds(date);
        let intakes = self
            .intakes
            .list_between(tenant_id, user_id, start, end)
            .await?;
        let goals = self.goals.list_active(tenant_id, user_id).await?;
        Ok(DailySummary::compute(
            date,
            &intakes,
            goal_for_date(&goals, date),
        ))
    }
}
