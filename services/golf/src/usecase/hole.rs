use chrono::Utc;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};

use crate::domain::events::{HoleScoreRecorded, HoleScoreRemoved, outbox};
use crate::domain::repository::{CourseRepository, RoundRepository};
use crate::domain::types::{
    Course, HoleScore, MAX_HOLE_SCORE, MAX_PUTTS, Round, RoundTotals, Scorecard, ValidationError,
    merge_hole, validate_at_most, validate_hole_par, validate_non_negative, validate_positive,
};
use crate::error::GolfError;

pub struct HoleScoreInput {
    pub hole_number: i32,
    pub par: i32,
    pub score: i32,
    pub putts: Option<i32>,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
}

/// Round, its course and current holes, loaded for a hole change.
async fn load<C: CourseRepository, R: RoundRepository>(
    courses: &C,
    rounds: &R,
    tenant_id: TenantId,
    user_id: UserId,
    round_id: Uuid,
) -> Result<(Round, Course, Vec<HoleScore>), GolfError> {
    let round = rounds
        .find_by_id(tenant_id, user_id, round_id)
        .await?
        .ok_or(GolfError::RoundNotFound)?;
    let course = courses
        .find_by_id(tenant_id, round.course_id)
        .await?
        .ok_or(GolfError::CourseNotFound)?;
    let holes = rounds.holes(tenant_id, round.id).await?;
    Ok((round, course, holes))
}

// ── RecordHoleScore ──────────────────────────────────────────────────────────

pub struct RecordHoleScoreUseCase<C: CourseRepository, R: RoundRepository> {
    pub courses: C,
    pub rounds: R,
}

impl<C: CourseRepository, R: RoundRepository> RecordHoleScoreUseCase<C, R> {
    /// Insert or replace the score for one hole and recompute the round totals.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        round_id: Uuid,
        input: HoleScoreInput,
    ) -> Result<Scorecard, GolfError> {
        validate_hole_par(input.par)?;
        validate_positive("score", input.score)?;
        validate_at_most("score", input.score, MAX_HOLE_SCORE)?;
        if let Some(putts) = input.putts {
            validate_non_negative("putts", putts)?;
            validate_at_most("putts", putts, MAX_PUTTS)?;
        }

        let (mut round, course, mut holes) =
            load(&self.courses, &self.rounds, tenant_id, user_id, round_id).await?;
        if !course.has_hole(input.hole_number) {
            return Err(ValidationError::HoleOutOfRange {
                holes: course.number_of_holes,
            }
            .into());
        }

        let now = Utc::now();
        let existing = holes.iter().find(|h| h.hole_number == input.hole_number);
        let hole = HoleScore {
            id: existing.map_or_else(Uuid::now_v7, |h| h.id),
            tenant_id,
            round_id: round.id,
            hole_number: input.hole_number,
            par: input.par,
            score: input.score,
            putts: input.putts,
            fairway_hit: input.fairway_hit,
            green_in_regulation: input.green_in_regulation,
            created_at: existing.map_or(now, |h| h.created_at),
        };
        merge_hole(&mut holes, hole.clone());
        round.apply_totals(RoundTotals::from_holes(&holes, course.total_par), now);

        let event = outbox(tenant_id, &HoleScoreRecorded::new(&round, &hole))?;
        self.rounds.record_hole(&round, &hole, &event).await?;
        Ok(Scorecard::new(round, course, holes))
    }
}

// ── DeleteHoleScore ──────────────────────────────────────────────────────────

pub struct DeleteHoleScoreUseCase<C: CourseRepository, R: RoundRepository> {
    pub courses: C,
    pub rounds: R,
}

impl<C: CourseRepository, R: RoundRepository> DeleteHoleScoreUseCase<C, R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        round_id: Uuid,
        hole_number: i32,
    ) -> Result<Scorecard, GolfError> {
        let (mut round, course, mut holes) =
            load(&self.courses, &self.rounds, tenant_id, user_id, round_id).await?;
        let before = holes.len();
        holes.retain(|h| h.hole_number != hole_number);
        if holes.len() == before {
            return Err(GolfError::HoleScoreNotFound);
        }

        let now = Utc::now();
        round.apply_totals(RoundTotals::from_holes(&holes, course.total_par), now);

        let event = outbox(
            tenant_id,
            &HoleScoreRemoved {
                event_id: Uuid::now_v7(),
                round_id: round.id,
                user_id,
                hole_number,
                round_total_score: round.total_score,
                round_total_par: round.total_par,
                occurred_at: now,
            },
        )?;
        if !self.rounds.remove_hole(&round, hole_number, &event).await? {
            return Err(GolfError::HoleScoreNotFound);
        }
        Ok(Scorecard::new(round, course, holes))
    }
}
