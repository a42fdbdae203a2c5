//! Integration events raised by the hydration service.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use hearth_domain::event::IntegrationEvent;
use hearth_domain::id::{TenantId, UserId};
use hearth_outbox::OutboxEvent;

use crate::domain::types::{BeverageType, Goal, Intake, Reminder};
use crate::error::HydrationError;

/// Wrap an event in an outbox record for the caller's tenant.
pub fn outbox<E: IntegrationEvent>(
    tenant_id: TenantId,
    event: &E,
) -> Result<OutboxEvent, HydrationError> {
    OutboxEvent::from_event(tenant_id, event).map_err(|e| HydrationError::Internal(e.into()))
}

/// An intake was recorded or edited. Carries the full resulting state.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeSaved {
    pub event_id: Uuid,
    pub intake_id: Uuid,
    pub user_id: UserId,
    pub beverage_type: BeverageType,
    pub amount_ml: Decimal,
    pub intake_time: DateTime<Utc>,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl IntakeSaved {
    pub fn new(intake: &Intake, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            intake_id: intake.id,
            user_id: intake.user_id,
            beverage_type: intake.beverage_type,
            amount_ml: intake.amount_ml,
            intake_time: intake.intake_time,
            created,
            occurred_at: intake.updated_at,
        }
    }
}

impl IntegrationEvent for IntakeSaved {
    const KIND: &'static str = "intake.saved";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.intake_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeDeleted {
    pub event_id: Uuid,
    pub intake_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for IntakeDeleted {
    const KIND: &'static str = "intake.deleted";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.intake_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalSaved {
    pub event_id: Uuid,
    pub goal_id: Uuid,
    pub user_id: UserId,
    pub daily_goal_ml: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl GoalSaved {
    pub fn new(goal: &Goal, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            goal_id: goal.id,
            user_id: goal.user_id,
            daily_goal_ml: goal.daily_goal_ml,
            start_date: goal.start_date,
            end_date: goal.end_date,
            is_active: goal.is_active,
            created,
            occurred_at: goal.updated_at,
        }
    }
}

impl IntegrationEvent for GoalSaved {
    const KIND: &'static str = "goal.saved";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.goal_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalDeleted {
    pub event_id: Uuid,
    pub goal_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for GoalDeleted {
    const KIND: &'static str = "goal.deleted";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.goal_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderSaved {
    pub event_id: Uuid,
    pub reminder_id: Uuid,
    pub user_id: UserId,
    pub reminder_time: NaiveTime,
    pub message: String,
    pub is_enabled: bool,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl ReminderSaved {
    pub fn new(reminder: &Reminder, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            reminder_id: reminder.id,
            user_id: reminder.user_id,
            reminder_time: reminder.reminder_time,
            message: reminder.message.clone(),
            is_enabled: reminder.is_enabled,
            created,
            occurred_at: reminder.updated_at,
        }
    }
}

impl IntegrationEvent for ReminderSaved {
    const KIND: &'static str = "reminder.saved";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.reminder_id
    }
}

/// Raised by the dedicated toggle endpoint so consumers can react to the flag alone.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderToggled {
    pub event_id: Uuid,
    pub reminder_id: Uuid,
    pub user_id: UserId,
    pub is_enabled: bool,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for ReminderToggled {
    const KIND: &'static str = "reminder.toggled";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.reminder_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderDeleted {
    pub event_id: Uuid,
    pub reminder_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for ReminderDeleted {
    const KIND: &'static str = "reminder.deleted";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.reminder_id
    }
}
