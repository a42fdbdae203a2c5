#![allow(async_fn_in_trait)]

use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Course, HoleScore, Round};
use crate::error::GolfError;

/// Repository for the tenant's courses.
pub trait CourseRepository: Send + Sync {
    /// Ordered by name.
    async fn list(&self, tenant_id: TenantId, page: PageRequest) -> Result<Vec<Course>, GolfError>;

    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<Course>, GolfError>;

    /// Case-sensitive name match, optionally ignoring one course.
    async fn name_taken(
        &self,
        tenant_id: TenantId,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<bool, GolfError>;

    /// Any round of any user refers to the course.
    async fn has_rounds(&self, tenant_id: TenantId, id: Uuid) -> Result<bool, GolfError>;

    /// Fails with [`GolfError::CourseAlreadyExists`] on a name clash.
    async fn create(&self, course: &Course, event: &OutboxEvent) -> Result<(), GolfError>;

    async fn update(&self, course: &Course, event: &OutboxEvent) -> Result<(), GolfError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError>;
}

/// Repository for rounds and the hole scores they own.
pub trait RoundRepository: Send + Sync {
    /// Most recently played first, optionally for one course.
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        course_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Round>, GolfError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Round>, GolfError>;

    /// Ordered by hole number.
    async fn holes(&self, tenant_id: TenantId, round_id: Uuid) -> Result<Vec<HoleScore>, GolfError>;

    async fn create(&self, round: &Round, event: &OutboxEvent) -> Result<(), GolfError>;

    async fn update(&self, round: &Round, event: &OutboxEvent) -> Result<(), GolfError>;

    /// Deletes the round with its hole scores. `false` if not found.
    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError>;

    /// Upsert `hole` by hole number and store the round's new totals together.
    async fn record_hole(
        &self,
        round: &Round,
        hole: &HoleScore,
        event: &OutboxEvent,
    ) -> Result<(), GolfError>;

    /// Remove one hole and store the round's new totals. `false` if the hole was absent.
    async fn remove_hole(
        &self,
        round: &Round,
        hole_number: i32,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError>;
}
