use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{CourseDeleted, CourseSaved, outbox};
use crate::domain::repository::CourseRepository;
use crate::domain::types::{
    Course, LOCATION_MAX, MAX_COURSE_PAR, MAX_SLOPE_RATING, NAME_MAX, NOTES_MAX, optional_text,
    text, validate_at_most, validate_course_rating, validate_hole_count, validate_positive,
};
use crate::error::GolfError;

pub struct CourseInput {
    pub name: String,
    pub location: Option<String>,
    pub number_of_holes: i32,
    pub total_par: i32,
    pub course_rating: Option<Decimal>,
    pub slope_rating: Option<i32>,
    pub notes: Option<String>,
}

struct ValidCourse {
    name: String,
    location: Option<String>,
    notes: Option<String>,
    course_rating: Option<Decimal>,
}

fn validate(input: &CourseInput) -> Result<ValidCourse, GolfError> {
    validate_hole_count(input.number_of_holes)?;
    validate_positive("total_par", input.total_par)?;
    validate_at_most("total_par", input.total_par, MAX_COURSE_PAR)?;
    if let Some(slope) = input.slope_rating {
        validate_positive("slope_rating", slope)?;
        validate_at_most("slope_rating", slope, MAX_SLOPE_RATING)?;
    }
    Ok(ValidCourse {
        course_rating: validate_course_rating(input.course_rating)?,
        name: text("name", &input.name, NAME_MAX)?,
        location: optional_text("location", input.location.as_deref(), LOCATION_MAX)?,
        notes: optional_text("notes", input.notes.as_deref(), NOTES_MAX)?,
    })
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> CreateCourseUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId, input: CourseInput) -> Result<Course, GolfError> {
        let valid = validate(&input)?;
        if self.repo.name_taken(tenant_id, &valid.name, None).await? {
            return Err(GolfError::CourseAlreadyExists);
        }
        let now = Utc::now();
        let course = Course {
            id: Uuid::now_v7(),
            tenant_id,
            name: valid.name,
            location: valid.location,
            number_of_holes: input.number_of_holes,
            total_par: input.total_par,
            course_rating: valid.course_rating,
            slope_rating: input.slope_rating,
            notes: valid.notes,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &CourseSaved::new(&course, true))?;
        self.repo.create(&course, &event).await?;
        Ok(course)
    }
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> ListCoursesUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId, page: PageRequest) -> Result<Vec<Course>, GolfError> {
        self.repo.list(tenant_id, page.clamped()).await
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<Course, GolfError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GolfError::CourseNotFound)
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> UpdateCourseUseCase<R> {
    /// Existing rounds keep the par they were recorded with.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        input: CourseInput,
    ) -> Result<Course, GolfError> {
        let valid = validate(&input)?;
        let mut course = self
            .repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(GolfError::CourseNotFound)?;
        if self.repo.name_taken(tenant_id, &valid.name, Some(id)).await? {
            return Err(GolfError::CourseAlreadyExists);
        }

        course.name = valid.name;
        course.location = valid.location;
        course.number_of_holes = input.number_of_holes;
        course.total_par = input.total_par;
        course.course_rating = valid.course_rating;
        course.slope_rating = input.slope_rating;
        course.notes = valid.notes;
        course.updated_at = Utc::now();

        let event = outbox(tenant_id, &CourseSaved::new(&course, false))?;
        self.repo.update(&course, &event).await?;
        Ok(course)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> DeleteCourseUseCase<R> {
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<(), GolfError> {
        if self.repo.has_rounds(tenant_id, id).await? {
            return Err(GolfError::CourseInUse);
        }
        let event = outbox(
            tenant_id,
            &CourseDeleted {
                event_id: Uuid::now_v7(),
                course_id: id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, id, &event).await? {
            return Err(GolfError::CourseNotFound);
        }
        Ok(())
    }
}
