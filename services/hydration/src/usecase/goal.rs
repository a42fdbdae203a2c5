use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{GoalDeleted, GoalSaved, outbox};
use crate::domain::repository::GoalRepository;
use crate::domain::types::{Goal, validate_date_range, validate_notes, validate_volume};
use crate::error::HydrationError;

pub struct GoalInput {
    pub daily_goal_ml: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: Option<String>,
}

/// Stored daily goal and notes.
fn validate(input: &GoalInput) -> Result<(Decimal, Option<String>), HydrationError> {
    let daily_goal_ml = validate_volume("daily_goal_ml", input.daily_goal_ml)?;
    validate_date_range(input.start_date, input.end_date)?;
    Ok((daily_goal_ml, validate_notes(input.notes.as_deref())?))
}

// ── CreateGoal ───────────────────────────────────────────────────────────────

pub struct CreateGoalUseCase<R: GoalRepository> {
    pub repo: R,
}

impl<R: GoalRepository> CreateGoalUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        input: GoalInput,
    ) -> Result<Goal, HydrationError> {
        let (daily_goal_ml, notes) = validate(&input)?;
        let now = Utc::now();
        let goal = Goal {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            daily_goal_ml,
            start_date: input.start_date,
            end_date: input.end_date,
            is_active: input.is_active,
            notes,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &GoalSaved::new(&goal, true))?;
        self.repo.create(&goal, &event).await?;
        Ok(goal)
    }
}

// ── ListGoals ────────────────────────────────────────────────────────────────

pub struct ListGoalsUseCase<R: GoalRepository> {
    pub repo: R,
}

impl<R: GoalRepository> ListGoalsUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Goal>, HydrationError> {
        self.repo.list(tenant_id, user_id, page.clamped()).await
    }
}

// ── GetGoal ──────────────────────────────────────────────────────────────────

pub struct GetGoalUseCase<R: GoalRepository> {
    pub repo: R,
}

impl<R: GoalRepository> GetGoalUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Goal, HydrationError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::GoalNotFound)
    }
}

// ── UpdateGoal ───────────────────────────────────────────────────────────────

pub struct UpdateGoalUseCase<R: GoalRepository> {
    pub repo: R,
}

impl<R: GoalRepository> UpdateGoalUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        input: GoalInput,
    ) -> Result<Goal, HydrationError> {
        let (daily_goal_ml, notes) = validate(&input)?;
        let mut goal = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::GoalNotFound)?;

        goal.daily_goal_ml = daily_goal_ml;
        goal.start_date = input.start_date;
        goal.end_date = input.end_date;
        goal.is_active = input.is_active;
        goal.notes = notes;
        goal.updated_at = Utc::now();

        let event = outbox(tenant_id, &GoalSaved::new(&goal, false))?;
        self.repo.update(&goal, &event).await?;
        Ok(goal)
    }
}

// ── DeleteGoal ───────────────────────────────────────────────────────────────

pub struct DeleteGoalUseCase<R: GoalRepository> {
    pub repo: R,
}

impl<R: GoalRepository> DeleteGoalUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), HydrationError> {
        let event = outbox(
            tenant_id,
            &GoalDeleted {
                event_id: Uuid::now_v7(),
                goal_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(HydrationError::GoalNotFound);
        }
        Ok(())
    }
}
