#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Goal, Intake, IntakeFilter, IntakeSortBy, Reminder};
use crate::error::HydrationError;

/// Repository for logged intakes. Every method is scoped to one tenant and user.
///
/// Writes take the integration event to record in the same transaction.
pub trait IntakeRepository: Send + Sync {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &IntakeFilter,
        sort_by: IntakeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Intake>, HydrationError>;

    /// All intakes with `from <= intake_time < to`, unpaged.
    async fn list_between(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Intake>, HydrationError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Intake>, HydrationError>;

    async fn create(&self, intake: &Intake, event: &OutboxEvent) -> Result<(), HydrationError>;

    async fn update(&self, intake: &Intake, event: &OutboxEvent) -> Result<(), HydrationError>;

    /// Returns `true` if deleted, `false` if not found.
    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError>;
}

/// Repository for daily goals.
pub trait GoalRepository: Send + Sync {
    /// Newest `start_date` first.
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Goal>, HydrationError>;

    /// Active goals, newest `start_date` first.
    async fn list_active(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<Goal>, HydrationError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Goal>, HydrationError>;

    async fn create(&self, goal: &Goal, event: &OutboxEvent) -> Result<(), HydrationError>;

    async fn update(&self, goal: &Goal, event: &OutboxEvent) -> Result<(), HydrationError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError>;
}

/// Repository for drink reminders.
pub trait ReminderRepository: Send + Sync {
    /// Ordered by time of day.
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        enabled_only: bool,
    ) -> Result<Vec<Reminder>, HydrationError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Reminder>, HydrationError>;

    async fn create(&self, reminder: &Reminder, event: &OutboxEvent)
    -> Result<(), HydrationError>;

    async fn update(&self, reminder: &Reminder, event: &OutboxEvent)
    -> Result<(), HydrationError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError>;
}
