use chrono::{NaiveTime, Utc};
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};

use crate::domain::events::{ReminderDeleted, ReminderSaved, ReminderToggled, outbox};
use crate::domain::repository::ReminderRepository;
use crate::domain::types::{Reminder, validate_message};
use crate::error::HydrationError;

pub struct ReminderInput {
    pub reminder_time: NaiveTime,
    pub message: String,
    pub is_enabled: bool,
}

// ── CreateReminder ───────────────────────────────────────────────────────────

pub struct CreateReminderUseCase<R: ReminderRepository> {
    pub repo: R,
}

impl<R: ReminderRepository> CreateReminderUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        input: ReminderInput,
    ) -> Result<Reminder, HydrationError> {
        let message = validate_message(&input.message)?;
        let now = Utc::now();
        let reminder = Reminder {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            reminder_time: input.reminder_time,
            message,
            is_enabled: input.is_enabled,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &ReminderSaved::new(&reminder, true))?;
        self.repo.create(&reminder, &event).await?;
        Ok(reminder)
    }
}

// ── ListReminders ────────────────────────────────────────────────────────────

pub struct ListRemindersUseCase<R: ReminderRepository> {
    pub repo: R,
}

impl<R: ReminderRepository> ListRemindersUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        enabled_only: bool,
    ) -> Result<Vec<Reminder>, HydrationError> {
        self.repo.list(tenant_id, user_id, enabled_only).await
    }
}

// ── GetReminder ──────────────────────────────────────────────────────────────

pub struct GetReminderUseCase<R: ReminderRepository> {
    pub repo: R,
}

impl<R: ReminderRepository> GetReminderUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Reminder, HydrationError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::ReminderNotFound)
    }
}

// ── UpdateReminder ───────────────────────────────────────────────────────────

pub struct UpdateReminderUseCase<R: ReminderRepository> {
    pub repo: R,
}

impl<R: ReminderRepository> UpdateReminderUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        input: ReminderInput,
    ) -> Result<Reminder, HydrationError> {
        let message = validate_message(&input.message)?;
        let mut reminder = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::ReminderNotFound)?;

        reminder.reminder_time = input.reminder_time;
        reminder.message = message;
        reminder.is_enabled = input.is_enabled;
        reminder.updated_at = Utc::now();

        let event = outbox(tenant_id, &ReminderSaved::new(&reminder, false))?;
        self.repo.update(&reminder, &event).await?;
        Ok(reminder)
    }
}

// ── ToggleReminder ───────────────────────────────────────────────────────────

pub struct ToggleReminderUseCase<R: ReminderRepository> {
    pub repo: R,
}

impl<R: ReminderRepository> ToggleReminderUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Reminder, HydrationError> {
        let mut reminder = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(HydrationError::ReminderNotFound)?;

        reminder.toggle(Utc::now());

        let event = outbox(
            tenant_id,
            &ReminderToggled {
                event_id: Uuid::now_v7(),
                reminder_id: reminder.id,
                user_id,
                is_enabled: reminder.is_enabled,
                occurred_at: reminder.updated_at,
            },
        )?;
        self.repo.update(&reminder, &event).await?;
        Ok(reminder)
    }
}

// ── DeleteReminder ───────────────────────────────────────────────────────────

pub struct DeleteReminderUseCase<R: ReminderRepository> {
    pub repo: R,
}

impl<R: ReminderRepository> DeleteReminderUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), HydrationError> {
        let event = outbox(
            tenant_id,
            &ReminderDeleted {
                event_id: Uuid::now_v7(),
                reminder_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(HydrationError::ReminderNotFound);
        }
        Ok(())
    }
}
