use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{IntakeDeleted, IntakeSaved, outbox};
use crate::domain::repository::IntakeRepository;
use crate::domain::types::{
    BeverageType, Intake, IntakeFilter, IntakeSortBy, ValidationError, validate_notes,
    validate_volume,
};
use crate::error::HydrationError;

/// Fields accepted when recording or replacing an intake.
pub struct IntakeInput {
    pub beverage_type: BeverageType,
    pub amount_ml: Decimal,
    /// Defaults to now on create; keeps the stored value on update.
    pub intake_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

// ── CreateIntake ─────────────────────────────────────────────────────────────

pub struct CreateIntakeUseCase<R: IntakeRepository> {
    pub repo: R,
}

impl<R: IntakeRepository> CreateIntakeUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        input: IntakeInput,
    ) -> Result<Intake, HydrationError> {
        let amount_ml = validate_volume("amount_ml", input.amount_ml)?;
        let notes = validate_notes(input.notes.as_deref())?;
        let now = Utc::now();
        let intake = Intake {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            beverage_type: input.beverage_type,
            amount_ml,
            intake_time: input.intake_time.unwrap_or(now),
            notes,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &IntakeSaved::new(&intake, true))?;
        self.repo.create(&intake, &event).await?;
        Ok(intake)
    }
}

// ── ListIntakes ──────────────────────────────────────────────────────────────

pub struct ListIntakesUseCase<R: IntakeRepository> {
    pub repo: R,
}

impl<R: IntakeRepository> ListIntakesUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: IntakeFilter,
        sort_by: IntakeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Intake>, HydrationError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from >= to {
                return Err(ValidationError::EmptyRange.into());
            }
        }
        self.repo
            .list(tenant_id, user_id, &filter, sort_by, page.clamped())
            .await
    }
}

// ── GetIntake ────────────────────────────────────────────────────────────────

pub struct GetIntakeUseCase<R: IntakeRepository> {
    pub repo: R,
}

impl<R: IntakeRepository> GetIntakeUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Intake, HydrationError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::IntakeNotFound)
    }
}

// ── UpdateIntake ─────────────────────────────────────────────────────────────

pub struct UpdateIntakeUseCase<R: IntakeRepository> {
    pub repo: R,
}

impl<R: IntakeRepository> UpdateIntakeUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        input: IntakeInput,
    ) -> Result<Intake, HydrationError> {
        let amount_ml = validate_volume("amount_ml", input.amount_ml)?;
        let notes = validate_notes(input.notes.as_deref())?;
        let mut intake = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::IntakeNotFound)?;

        intake.beverage_type = input.beverage_type;
        intake.amount_ml = amount_ml;
        if let Some(at) = input.intake_time {
            intake.intake_time = at;
        }
        intake.notes = notes;
        intake.updated_at = Utc::now();

        let event = outbox(tenant_id, &IntakeSaved::new(&intake, false))?;
        self.repo.update(&intake, &event).await?;
        Ok(intake)
    }
}

// ── DeleteIntake ─────────────────────────────────────────────────────────────

pub struct DeleteIntakeUseCase<R: IntakeRepository> {
    pub repo: R,
}

impl<R: IntakeRepository> DeleteIntakeUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), HydrationError> {
        let event = outbox(
            tenant_id,
            &IntakeDeleted {
                event_id: Uuid::now_v7(),
                intake_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(HydrationError::IntakeNotFound);
        }
        Ok(())
    }
}
