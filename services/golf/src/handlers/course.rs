use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_core::tenant::TenantContext;
use hearth_domain::pagination::PageRequest;

use crate::domain::types::Course;
use crate::error::GolfError;
use crate::state::AppState;
use crate::usecase::course::{
    CourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase, ListCoursesUseCase,
    UpdateCourseUseCase,
};

#[derive(Deserialize)]
pub struct CourseRequest {
    pub name: String,
    pub location: Option<String>,
    pub number_of_holes: i32,
    pub total_par: i32,
    pub course_rating: Option<Decimal>,
    pub slope_rating: Option<i32>,
    pub notes: Option<String>,
}

impl From<CourseRequest> for CourseInput {
    fn from(body: CourseRequest) -> Self {
        Self {
            name: body.name,
            location: body.location,
            number_of_holes: body.number_of_holes,
            total_par: body.total_par,
            course_rating: body.course_rating,
            slope_rating: body.slope_rating,
            notes: body.notes,
        }
    }
}

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub number_of_holes: i32,
    pub total_par: i32,
    pub course_rating: Option<Decimal>,
    pub slope_rating: Option<i32>,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            location: course.location,
            number_of_holes: course.number_of_holes,
            total_par: course.total_par,
            course_rating: course.course_rating,
            slope_rating: course.slope_rating,
            notes: course.notes,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

// ── POST /courses ────────────────────────────────────────────────────────────

pub async fn create_course(
    tenant: TenantContext,
    State(state): State<AppState>,
    Json(body): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), GolfError> {
    let usecase = CreateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase.execute(tenant.tenant_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── GET /courses ─────────────────────────────────────────────────────────────

pub async fn get_courses(
    tenant: TenantContext,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<CourseResponse>>, GolfError> {
    let usecase = ListCoursesUseCase {
        repo: state.course_repo(),
    };
    let courses = usecase.execute(tenant.tenant_id, page).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

// ── GET /courses/{id} ────────────────────────────────────────────────────────

pub async fn get_course(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, GolfError> {
    let usecase = GetCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase.execute(tenant.tenant_id, id).await?;
    Ok(Json(course.into()))
}

// ── PUT /courses/{id} ────────────────────────────────────────────────────────

pub async fn update_course(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, GolfError> {
    let usecase = UpdateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase.execute(tenant.tenant_id, id, body.into()).await?;
    Ok(Json(course.into()))
}

// ── DELETE /courses/{id} ─────────────────────────────────────────────────────

pub async fn delete_course(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GolfError> {
    let usecase = DeleteCourseUseCase {
        repo: state.course_repo(),
    };
    usecase.execute(tenant.tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
