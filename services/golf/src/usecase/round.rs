use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{RoundDeleted, RoundSaved, outbox};
use crate::domain::repository::{CourseRepository, RoundRepository};
use crate::domain::types::{
    MAX_ROUND_SCORE, NOTES_MAX, Round, Scorecard, WEATHER_MAX, optional_text, validate_at_most,
    validate_non_negative,
};
use crate::error::GolfError;

pub struct CreateRoundInput {
    pub course_id: Uuid,
    pub played_date: NaiveDate,
    /// Score before any hole is recorded. Defaults to zero.
    pub total_score: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
}

pub struct UpdateRoundInput {
    pub played_date: NaiveDate,
    pub weather: Option<String>,
    pub notes: Option<String>,
}

// ── CreateRound ──────────────────────────────────────────────────────────────

pub struct CreateRoundUseCase<C: CourseRepository, R: RoundRepository> {
    pub courses: C,
    pub rounds: R,
}

impl<C: CourseRepository, R: RoundRepository> CreateRoundUseCase<C, R> {
    /// The round starts at the course's par.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        input: CreateRoundInput,
    ) -> Result<Round, GolfError> {
        let total_score = input.total_score.unwrap_or(0);
        validate_non_negative("total_score", total_score)?;
        validate_at_most("total_score", total_score, MAX_ROUND_SCORE)?;
        let weather = optional_text("weather", input.weather.as_deref(), WEATHER_MAX)?;
        let notes = optional_text("notes", input.notes.as_deref(), NOTES_MAX)?;

        let course = self
            .courses
            .find_by_id(tenant_id, input.course_id)
            .await?
            .ok_or(GolfError::CourseNotFound)?;

        let now = Utc::now();
        let round = Round {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            course_id: course.id,
            played_date: input.played_date,
            total_score,
            total_par: course.total_par,
            weather,
            notes,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &RoundSaved::new(&round, true))?;
        self.rounds.create(&round, &event).await?;
        Ok(round)
    }
}

// ── ListRounds ───────────────────────────────────────────────────────────────

pub struct ListRoundsUseCase<R: RoundRepository> {
    pub repo: R,
}

impl<R: RoundRepository> ListRoundsUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        course_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Round>, GolfError> {
        self.repo
            .list(tenant_id, user_id, course_id, page.clamped())
            .await
    }
}

// ── GetScorecard ─────────────────────────────────────────────────────────────

pub struct GetScorecardUseCase<C: CourseRepository, R: RoundRepository> {
    pub courses: C,
    pub rounds: R,
}

impl<C: CourseRepository, R: RoundRepository> GetScorecardUseCase<C, R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Scorecard, GolfError> {
        let round = self
            .rounds
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(GolfError::RoundNotFound)?;
        let course = self
            .courses
            .find_by_id(tenant_id, round.course_id)
            .await?
            .ok_or(GolfError::CourseNotFound)?;
        let holes = self.rounds.holes(tenant_id, round.id).await?;
        Ok(Scorecard::new(round, course, holes))
    }
}

// ── UpdateRound ──────────────────────────────────────────────────────────────

pub struct UpdateRoundUseCase<R: RoundRepository> {
    pub repo: R,
}

impl<R: RoundRepository> UpdateRoundUseCase<R> {
    /// Totals are owned by the hole scores and are left alone.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        input: UpdateRoundInput,
    ) -> Result<Round, GolfError> {
        let weather = optional_text("weather", input.weather.as_deref(), WEATHER_MAX)?;
        let notes = optional_text("notes", input.notes.as_deref(), NOTES_MAX)?;
        let mut round = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(GolfError::RoundNotFound)?;

        round.played_date = input.played_date;
        round.weather = weather;
        round.notes = notes;
        round.updated_at = Utc::now();

        let event = outbox(tenant_id, &RoundSaved::new(&round, false))?;
        self.repo.update(&round, &event).await?;
        Ok(round)
    }
}

// ── DeleteRound ──────────────────────────────────────────────────────────────

pub struct DeleteRoundUseCase<R: RoundRepository> {
    pub repo: R,
}

impl<R: RoundRepository> DeleteRoundUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), GolfError> {
        let event = outbox(
            tenant_id,
            &RoundDeleted {
                event_id: Uuid::now_v7(),
                round_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(GolfError::RoundNotFound);
        }
        Ok(())
    }
}
