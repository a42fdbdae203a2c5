use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionError, TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use hearth_core::sea_ext::{SelectExt, is_unique_violation};
use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;
use hearth_golf_schema::{courses, hole_scores, rounds};
use hearth_outbox::{OutboxEvent, store::record};

use crate::domain::repository::{CourseRepository, RoundRepository};
use crate::domain::types::{Course, HoleScore, Round};
use crate::error::GolfError;

/// Map a failed course write, turning the `(tenant_id, name)` index into a conflict.
fn course_write_error(err: TransactionError<DbErr>, context: &'static str) -> GolfError {
    match err {
        TransactionError::Transaction(ref db) if is_unique_violation(db) => {
            GolfError::CourseAlreadyExists
        }
        other => GolfError::Internal(anyhow::Error::new(other).context(context)),
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self, tenant_id: TenantId, page: PageRequest) -> Result<Vec<Course>, GolfError> {
        let models = courses::Entity::find()
            .tenant_scoped(courses::Column::TenantId, tenant_id)
            .order_by_asc(courses::Column::Name)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<Course>, GolfError> {
        let model = courses::Entity::find_by_id(id)
            .tenant_scoped(courses::Column::TenantId, tenant_id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn name_taken(
        &self,
        tenant_id: TenantId,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<bool, GolfError> {
        let mut query = courses::Entity::find()
            .tenant_scoped(courses::Column::TenantId, tenant_id)
            .filter(courses::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(courses::Column::Id.ne(id));
        }
        let found = query.one(&self.db).await.context("check course name")?;
        Ok(found.is_some())
    }

    async fn has_rounds(&self, tenant_id: TenantId, id: Uuid) -> Result<bool, GolfError> {
        let found = rounds::Entity::find()
            .tenant_scoped(rounds::Column::TenantId, tenant_id)
            .filter(rounds::Column::CourseId.eq(id))
            .one(&self.db)
            .await
            .context("check course rounds")?;
        Ok(found.is_some())
    }

    async fn create(&self, course: &Course, event: &OutboxEvent) -> Result<(), GolfError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = course_to_active_model(course);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| course_write_error(e, "create course with outbox"))
    }

    async fn update(&self, course: &Course, event: &OutboxEvent) -> Result<(), GolfError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = course_to_active_model(course);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| course_write_error(e, "update course with outbox"))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = courses::Entity::delete_many()
                        .filter(courses::Column::Id.eq(id))
                        .filter(courses::Column::TenantId.eq(tenant_id.0))
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
            .context("delete course with outbox")?;
        Ok(deleted)
    }
}

fn course_to_active_model(course: &Course) -> courses::ActiveModel {
    courses::ActiveModel {
        id: Set(course.id),
        tenant_id: Set(course.tenant_id.0),
        name: Set(course.name.clone()),
        location: Set(course.location.clone()),
        number_of_holes: Set(course.number_of_holes),
        total_par: Set(course.total_par),
        course_rating: Set(course.course_rating),
        slope_rating: Set(course.slope_rating),
        notes: Set(course.notes.clone()),
        created_at: Set(course.created_at),
        updated_at: Set(course.updated_at),
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        name: model.name,
        location: model.location,
        number_of_holes: model.number_of_holes,
        total_par: model.total_par,
        course_rating: model.course_rating,
        slope_rating: model.slope_rating,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Round repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoundRepository {
    pub db: DatabaseConnection,
}

impl RoundRepository for DbRoundRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        course_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<Round>, GolfError> {
        let mut query = rounds::Entity::find()
            .tenant_scoped(rounds::Column::TenantId, tenant_id)
            .owned_by(rounds::Column::UserId, user_id);
        if let Some(course_id) = course_id {
            query = query.filter(rounds::Column::CourseId.eq(course_id));
        }
        let models = query
            .order_by_desc(rounds::Column::PlayedDate)
            .order_by_desc(rounds::Column::CreatedAt)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list rounds")?;
        Ok(models.into_iter().map(round_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Round>, GolfError> {
        let model = rounds::Entity::find_by_id(id)
            .tenant_scoped(rounds::Column::TenantId, tenant_id)
            .owned_by(rounds::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find round by id")?;
        Ok(model.map(round_from_model))
    }

    async fn holes(&self, tenant_id: TenantId, round_id: Uuid) -> Result<Vec<HoleScore>, GolfError> {
        let models = hole_scores::Entity::find()
            .tenant_scoped(hole_scores::Column::TenantId, tenant_id)
            .filter(hole_scores::Column::RoundId.eq(round_id))
            .order_by_asc(hole_scores::Column::HoleNumber)
            .all(&self.db)
            .await
            .context("list hole scores")?;
        Ok(models.into_iter().map(hole_from_model).collect())
    }

    async fn create(&self, round: &Round, event: &OutboxEvent) -> Result<(), GolfError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = round_to_active_model(round);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create round with outbox")?;
        Ok(())
    }

    async fn update(&self, round: &Round, event: &OutboxEvent) -> Result<(), GolfError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = round_to_active_model(round);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update round with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    // hole_scores cascade
                    let result = rounds::Entity::delete_many()
                        .filter(rounds::Column::Id.eq(id))
                        .filter(rounds::Column::TenantId.eq(tenant_id.0))
                        .filter(rounds::Column::UserId.eq(user_id.0))
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
            .context("delete round with outbox")?;
        Ok(deleted)
    }

    async fn record_hole(
        &self,
        round: &Round,
        hole: &HoleScore,
        event: &OutboxEvent,
    ) -> Result<(), GolfError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let hole = hole_to_active_model(hole);
                let totals = round_totals_active_model(round);
                let event = event.clone();
                Box::pin(async move {
                    hole_scores::Entity::insert(hole)
                        .on_conflict(
                            OnConflict::columns([
                                hole_scores::Column::RoundId,
                                hole_scores::Column::HoleNumber,
                            ])
                            .update_columns([
                                hole_scores::Column::Par,
                                hole_scores::Column::Score,
                                hole_scores::Column::Putts,
                                hole_scores::Column::FairwayHit,
                                hole_scores::Column::GreenInRegulation,
                            ])
                            .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await?;
                    totals.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("record hole score with outbox")?;
        Ok(())
    }

    async fn remove_hole(
        &self,
        round: &Round,
        hole_number: i32,
        event: &OutboxEvent,
    ) -> Result<bool, GolfError> {
        let tenant_id = round.tenant_id;
        let round_id = round.id;
        let removed = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let totals = round_totals_active_model(round);
                let event = event.clone();
                Box::pin(async move {
                    let result = hole_scores::Entity::delete_many()
                        .filter(hole_scores::Column::RoundId.eq(round_id))
                        .filter(hole_scores::Column::TenantId.eq(tenant_id.0))
                        .filter(hole_scores::Column::HoleNumber.eq(hole_number))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    totals.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("remove hole score with outbox")?;
        Ok(removed)
    }
}

fn round_to_active_model(round: &Round) -> rounds::ActiveModel {
    rounds::ActiveModel {
        id: Set(round.id),
        tenant_id: Set(round.tenant_id.0),
        user_id: Set(round.user_id.0),
        course_id: Set(round.course_id),
        played_date: Set(round.played_date),
        total_score: Set(round.total_score),
        total_par: Set(round.total_par),
        weather: Set(round.weather.clone()),
        notes: Set(round.notes.clone()),
        created_at: Set(round.created_at),
        updated_at: Set(round.updated_at),
    }
}

/// Only the columns a hole change touches.
fn round_totals_active_model(round: &Round) -> rounds::ActiveModel {
    rounds::ActiveModel {
        id: Set(round.id),
        total_score: Set(round.total_score),
        total_par: Set(round.total_par),
        updated_at: Set(round.updated_at),
        ..Default::default()
    }
}

fn round_from_model(model: rounds::Model) -> Round {
    Round {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        course_id: model.course_id,
        played_date: model.played_date,
        total_score: model.total_score,
        total_par: model.total_par,
        weather: model.weather,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn hole_to_active_model(hole: &HoleScore) -> hole_scores::ActiveModel {
    hole_scores::ActiveModel {
        id: Set(hole.id),
        tenant_id: Set(hole.tenant_id.0),
        round_id: Set(hole.round_id),
        hole_number: Set(hole.hole_number),
        par: Set(hole.par),
        score: Set(hole.score),
        putts: Set(hole.putts),
        fairway_hit: Set(hole.fairway_hit),
        green_in_regulation: Set(hole.green_in_regulation),
        created_at: Set(hole.created_at),
    }
}

fn hole_from_model(model: hole_scores::Model) -> HoleScore {
    HoleScore {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        round_id: model.round_id,
        hole_number: model.hole_number,
        par: model.par,
        score: model.score,
        putts: model.putts,
        fairway_hit: model.fairway_hit,
        green_in_regulation: model.green_in_regulation,
        created_at: model.created_at,
    }
}
