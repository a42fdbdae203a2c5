//! Integration events raised by the golf service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use hearth_domain::event::IntegrationEvent;
use hearth_domain::id::{TenantId, UserId};
use hearth_outbox::OutboxEvent;

use crate::domain::types::{Course, HoleScore, Round};
use crate::error::GolfError;

pub fn outbox<E: IntegrationEvent>(tenant_id: TenantId, event: &E) -> Result<OutboxEvent, GolfError> {
    OutboxEvent::from_event(tenant_id, event).map_err(|e| GolfError::Internal(e.into()))
}

macro_rules! integration_event {
    ($ty:ty, $kind:literal, $aggregate:ident) => {
        impl IntegrationEvent for $ty {
            const KIND: &'static str = $kind;

            fn event_id(&self) -> Uuid {
                self.event_id
            }

            fn aggregate_id(&self) -> Uuid {
                self.$aggregate
            }
        }
    };
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseSaved {
    pub event_id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub number_of_holes: i32,
    pub total_par: i32,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl CourseSaved {
    pub fn new(course: &Course, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            course_id: course.id,
            name: course.name.clone(),
            number_of_holes: course.number_of_holes,
            total_par: course.total_par,
            created,
            occurred_at: course.updated_at,
        }
    }
}

integration_event!(CourseSaved, "course.saved", course_id);

#[derive(Debug, Clone, Serialize)]
pub struct CourseDeleted {
    pub event_id: Uuid,
    pub course_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(CourseDeleted, "course.deleted", course_id);

#[derive(Debug, Clone, Serialize)]
pub struct RoundSaved {
    pub event_id: Uuid,
    pub round_id: Uuid,
    pub user_id: UserId,
    pub course_id: Uuid,
    pub played_date: NaiveDate,
    pub total_score: i32,
    pub total_par: i32,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl RoundSaved {
    pub fn new(round: &Round, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            round_id: round.id,
            user_id: round.user_id,
            course_id: round.course_id,
            played_date: round.played_date,
            total_score: round.total_score,
            total_par: round.total_par,
            created,
            occurred_at: round.updated_at,
        }
    }
}

integration_event!(RoundSaved, "round.saved", round_id);

#[derive(Debug, Clone, Serialize)]
pub struct RoundDeleted {
    pub event_id: Uuid,
    pub round_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(RoundDeleted, "round.deleted", round_id);

/// Raised on every upsert; totals are the round's after the change.
#[derive(Debug, Clone, Serialize)]
pub struct HoleScoreRecorded {
    pub event_id: Uuid,
    pub round_id: Uuid,
    pub user_id: UserId,
    pub hole_number: i32,
    pub par: i32,
    pub score: i32,
    pub round_total_score: i32,
    pub round_total_par: i32,
    pub occurred_at: DateTime<Utc>,
}

impl HoleScoreRecorded {
    pub fn new(round: &Round, hole: &HoleScore) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            round_id: round.id,
            user_id: round.user_id,
            hole_number: hole.hole_number,
            par: hole.par,
            score: hole.score,
            round_total_score: round.total_score,
            round_total_par: round.total_par,
            occurred_at: round.updated_at,
        }
    }
}

integration_event!(HoleScoreRecorded, "hole_score.recorded", round_id);

#[derive(Debug, Clone, Serialize)]
pub struct HoleScoreRemoved {
    pub event_id: Uuid,
    pub round_id: Uuid,
    pub user_id: UserId,
    pub hole_number: i32,
    pub round_total_score: i32,
    pub round_total_par: i32,
    pub occurred_at: DateTime<Utc>,
}

integration_event!(HoleScoreRemoved, "hole_score.removed", round_id);
