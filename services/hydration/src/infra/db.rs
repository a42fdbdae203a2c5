use std::str::FromStr;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use hearth_core::sea_ext::SelectExt;
use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::{PageRequest, Sort};
use hearth_hydration_schema::{goals, intakes, reminders};
use hearth_outbox::{OutboxEvent, store::record};

use crate::domain::repository::{GoalRepository, IntakeRepository, ReminderRepository};
use crate::domain::types::{BeverageType, Goal, Intake, IntakeFilter, IntakeSortBy, Reminder};
use crate::error::HydrationError;

// ── Intake repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIntakeRepository {
    pub db: DatabaseConnection,
}

impl IntakeRepository for DbIntakeRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &IntakeFilter,
        sort_by: IntakeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Intake>, HydrationError> {
        let mut query = intakes::Entity::find()
            .tenant_scoped(intakes::Column::TenantId, tenant_id)
            .owned_by(intakes::Column::UserId, user_id);
        if let Some(from) = filter.from {
            query = query.filter(intakes::Column::IntakeTime.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(intakes::Column::IntakeTime.lt(to));
        }
        if let Some(beverage) = filter.beverage_type {
            query = query.filter(intakes::Column::BeverageType.eq(beverage.as_str()));
        }
        query = match sort_by {
            IntakeSortBy::IntakeTime(Sort::Desc) => {
                query.order_by_desc(intakes::Column::IntakeTime)
            }
            IntakeSortBy::IntakeTime(Sort::Asc) => query.order_by_asc(intakes::Column::IntakeTime),
        };
        let models = query
            .in_page(page)
            .all(&self.db)
            .await
            .context("list intakes")?;
        models.into_iter().map(intake_from_model).collect()
    }

    async fn list_between(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Intake>, HydrationError> {
        let models = intakes::Entity::find()
            .tenant_scoped(intakes::Column::TenantId, tenant_id)
            .owned_by(intakes::Column::UserId, user_id)
            .filter(intakes::Column::IntakeTime.gte(from))
            .filter(intakes::Column::IntakeTime.lt(to))
            .order_by_asc(intakes::Column::IntakeTime)
            .all(&self.db)
            .await
            .context("list intakes between")?;
        models.into_iter().map(intake_from_model).collect()
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Intake>, HydrationError> {
        let model = intakes::Entity::find_by_id(id)
            .tenant_scoped(intakes::Column::TenantId, tenant_id)
            .owned_by(intakes::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find intake by id")?;
        model.map(intake_from_model).transpose()
    }

    async fn create(&self, intake: &Intake, event: &OutboxEvent) -> Result<(), HydrationError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = intake_to_active_model(intake);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create intake with outbox")?;
        Ok(())
    }

    async fn update(&self, intake: &Intake, event: &OutboxEvent) -> Result<(), HydrationError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = intake_to_active_model(intake);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update intake with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = intakes::Entity::delete_many()
                        .filter(intakes::Column::Id.eq(id))
                        .filter(intakes::Column::TenantId.eq(tenant_id.0))
                        .filter(intakes::Column::UserId.eq(user_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete intake with outbox")?;
        Ok(deleted)
    }
}

fn intake_to_active_model(intake: &Intake) -> intakes::ActiveModel {
    intakes::ActiveModel {
        id: Set(intake.id),
        tenant_id: Set(intake.tenant_id.0),
        user_id: Set(intake.user_id.0),
        beverage_type: Set(intake.beverage_type.as_str().to_owned()),
        amount_ml: Set(intake.amount_ml),
        intake_time: Set(intake.intake_time),
        notes: Set(intake.notes.clone()),
        created_at: Set(intake.created_at),
        updated_at: Set(intake.updated_at),
    }
}

fn intake_from_model(model: intakes::Model) -> Result<Intake, HydrationError> {
    let beverage_type = BeverageType::from_str(&model.beverage_type)
        .map_err(|e| HydrationError::Internal(anyhow::anyhow!(e)))?;
    Ok(Intake {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        beverage_type,
        amount_ml: model.amount_ml,
        intake_time: model.intake_time,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Goal repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGoalRepository {
    pub db: DatabaseConnection,
}

impl GoalRepository for DbGoalRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Goal>, HydrationError> {
        let models = goals::Entity::find()
            .tenant_scoped(goals::Column::TenantId, tenant_id)
            .owned_by(goals::Column::UserId, user_id)
            .order_by_desc(goals::Column::StartDate)
            .order_by_desc(goals::Column::CreatedAt)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list goals")?;
        Ok(models.into_iter().map(goal_from_model).collect())
    }

    async fn list_active(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<Goal>, HydrationError> {
        let models = goals::Entity::find()
            .tenant_scoped(goals::Column::TenantId, tenant_id)
            .owned_by(goals::Column::UserId, user_id)
            .filter(goals::Column::IsActive.eq(true))
            .order_by_desc(goals::Column::StartDate)
            .all(&self.db)
            .await
            .context("list active goals")?;
        Ok(models.into_iter().map(goal_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Goal>, HydrationError> {
        let model = goals::Entity::find_by_id(id)
            .tenant_scoped(goals::Column::TenantId, tenant_id)
            .owned_by(goals::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find goal by id")?;
        Ok(model.map(goal_from_model))
    }

    async fn create(&self, goal: &Goal, event: &OutboxEvent) -> Result<(), HydrationError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = goal_to_active_model(goal);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create goal with outbox")?;
        Ok(())
    }

    async fn update(&self, goal: &Goal, event: &OutboxEvent) -> Result<(), HydrationError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = goal_to_active_model(goal);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update goal with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = goals::Entity::delete_many()
                        .filter(goals::Column::Id.eq(id))
                        .filter(goals::Column::TenantId.eq(tenant_id.0))
                        .filter(goals::Column::UserId.eq(user_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete goal with outbox")?;
        Ok(deleted)
    }
}

fn goal_to_active_model(goal: &Goal) -> goals::ActiveModel {
    goals::ActiveModel {
        id: Set(goal.id),
        tenant_id: Set(goal.tenant_id.0),
        user_id: Set(goal.user_id.0),
        daily_goal_ml: Set(goal.daily_goal_ml),
        start_date: Set(goal.start_date),
        end_date: Set(goal.end_date),
        is_active: Set(goal.is_active),
        notes: Set(goal.notes.clone()),
        created_at: Set(goal.created_at),
        updated_at: Set(goal.updated_at),
    }
}

fn goal_from_model(model: goals::Model) -> Goal {
    Goal {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        daily_goal_ml: model.daily_goal_ml,
        start_date: model.start_date,
        end_date: model.end_date,
        is_active: model.is_active,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Reminder repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReminderRepository {
    pub db: DatabaseConnection,
}

impl ReminderRepository for DbReminderRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        enabled_only: bool,
    ) -> Result<Vec<Reminder>, HydrationError> {
        let mut query = reminders::Entity::find()
            .tenant_scoped(reminders::Column::TenantId, tenant_id)
            .owned_by(reminders::Column::UserId, user_id);
        if enabled_only {
            query = query.filter(reminders::Column::IsEnabled.eq(true));
        }
        let models = query
            .order_by_asc(reminders::Column::ReminderTime)
            .all(&self.db)
            .await
            .context("list reminders")?;
        Ok(models.into_iter().map(reminder_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Reminder>, HydrationError> {
        let model = reminders::Entity::find_by_id(id)
            .tenant_scoped(reminders::Column::TenantId, tenant_id)
            .owned_by(reminders::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find reminder by id")?;
        Ok(model.map(reminder_from_model))
    }

    async fn create(
        &self,
        reminder: &Reminder,
        event: &OutboxEvent,
    ) -> Result<(), HydrationError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = reminder_to_active_model(reminder);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create reminder with outbox")?;
        Ok(())
    }

    async fn update(
        &self,
        reminder: &Reminder,
        event: &OutboxEvent,
    ) -> Result<(), HydrationError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = reminder_to_active_model(reminder);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update reminder with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = reminders::Entity::delete_many()
                        .filter(reminders::Column::Id.eq(id))
                        .filter(reminders::Column::TenantId.eq(tenant_id.0))
                        .filter(reminders::Column::UserId.eq(user_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete reminder with outbox")?;
        Ok(deleted)
    }
}

fn reminder_to_active_model(reminder: &Reminder) -> reminders::ActiveModel {
    reminders::ActiveModel {
        id: Set(reminder.id),
        tenant_id: Set(reminder.tenant_id.0),
        user_id: Set(reminder.user_id.0),
        reminder_time: Set(reminder.reminder_time),
        message: Set(reminder.message.clone()),
        is_enabled: Set(reminder.is_enabled),
        created_at: Set(reminder.created_at),
        updated_at: Set(reminder.updated_at),
    }
}

fn reminder_from_model(model: reminders::Model) -> Reminder {
    Reminder {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        reminder_time: model.reminder_time,
        message: model.message,
        is_enabled: model.is_enabled,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
