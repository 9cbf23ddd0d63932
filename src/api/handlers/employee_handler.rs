//! Employee handlers: own courses, progress, assessments and ratings.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidPath, ValidatedJson};
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    Assignment, AttemptResult, CourseRating, EnrolledCourse, PublicAssessment, RateableCourse,
    RatingUpsert, SelectedOption, UserRole,
};
use crate::errors::AppResult;
use crate::types::ApiResponse;

const EMPLOYEES_ONLY: &str = "Only employees can access this";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProgressRequest {
    /// Percentage in 0..=100
    #[schema(example = 60)]
    pub progress: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAssessmentRequest {
    /// Question id mapped to the chosen option index
    #[schema(value_type = Object)]
    pub answers: HashMap<Uuid, SelectedOption>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RateCourseRequest {
    /// Stars in 1..=5
    #[schema(example = 4)]
    pub rating: i32,
    pub review: Option<String>,
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/my-courses", get(my_courses))
        .route("/update-progress/:course_id", patch(update_progress))
        .route("/complete-course/:course_id", post(complete_course))
        .route("/:course_id/assessments", get(course_assessments))
        .route("/submit-assessment/:assessment_id", post(submit_assessment))
        .route("/available-for-rating", get(available_for_rating))
        .route("/rate-course/:course_id", post(rate_course))
}

/// Courses assigned to the caller
#[utoipa::path(
    get,
    path = "/api/employee/my-courses",
    tag = "Employee",
    responses(
        (status = 200, description = "Assigned courses", body = [EnrolledCourse]),
        (status = 403, description = "Only employees can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<EnrolledCourse>>> {
    require_role(&user, &[UserRole::Employee], EMPLOYEES_ONLY)?;
    Ok(Json(state.services.assignments().my_courses(user.id).await?))
}

/// Record progress on an assigned course
#[utoipa::path(
    patch,
    path = "/api/employee/update-progress/{course_id}",
    tag = "Employee",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Progress updated", body = Assignment),
        (status = 400, description = "Progress must be between 0 and 100"),
        (status = 403, description = "Only employees can update course progress"),
        (status = 404, description = "Course not assigned")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<ProgressRequest>,
) -> AppResult<Json<ApiResponse<Assignment>>> {
    require_role(&user, &[UserRole::Employee], "Only employees can update course progress")?;

    let assignment = state
        .services
        .assignments()
        .update_progress(user.id, course_id, body.progress)
        .await?;
    Ok(Json(ApiResponse::with_message(
        assignment,
        "Progress updated successfully",
    )))
}

/// Mark an assigned course as completed
#[utoipa::path(
    post,
    path = "/api/employee/complete-course/{course_id}",
    tag = "Employee",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course completed", body = Assignment),
        (status = 403, description = "Only employees can complete courses"),
        (status = 404, description = "Course not assigned")
    ),
    security(("bearer_auth" = []))
)]
pub async fn complete_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
) -> AppResult<Json<ApiResponse<Assignment>>> {
    require_role(&user, &[UserRole::Employee], "Only employees can complete courses")?;

    let assignment = state
        .services
        .assignments()
        .complete(user.id, course_id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        assignment,
        "Course marked as completed",
    )))
}

/// Assessments of an assigned course, without answers
#[utoipa::path(
    get,
    path = "/api/employee/{course_id}/assessments",
    tag = "Employee",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assessments", body = [PublicAssessment]),
        (status = 403, description = "Course not assigned to you")
    ),
    security(("bearer_auth" = []))
)]
pub async fn course_assessments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
) -> AppResult<Json<Vec<PublicAssessment>>> {
    require_role(&user, &[UserRole::Employee], EMPLOYEES_ONLY)?;
    let assessments = state
        .services
        .assessments()
        .list_for_employee(user.id, course_id)
        .await?;
    Ok(Json(assessments))
}

/// Submit the single allowed attempt
#[utoipa::path(
    post,
    path = "/api/employee/submit-assessment/{assessment_id}",
    tag = "Employee",
    params(("assessment_id" = Uuid, Path, description = "Assessment ID")),
    request_body = SubmitAssessmentRequest,
    responses(
        (status = 200, description = "Attempt scored", body = AttemptResult),
        (status = 400, description = "You have already attempted this assessment"),
        (status = 403, description = "Only employees can submit assessments"),
        (status = 404, description = "Assessment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(assessment_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<SubmitAssessmentRequest>,
) -> AppResult<Json<ApiResponse<AttemptResult>>> {
    require_role(&user, &[UserRole::Employee], "Only employees can submit assessments")?;

    let attempt = state
        .services
        .assessments()
        .submit(user.id, assessment_id, body.answers)
        .await?;
    Ok(Json(ApiResponse::with_message(
        AttemptResult::from(&attempt),
        "Assessment submitted",
    )))
}

/// Assigned courses the caller may rate
#[utoipa::path(
    get,
    path = "/api/employee/available-for-rating",
    tag = "Employee",
    responses(
        (status = 200, description = "Rateable courses", body = [RateableCourse]),
        (status = 403, description = "Only employees can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn available_for_rating(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<RateableCourse>>> {
    require_role(&user, &[UserRole::Employee], EMPLOYEES_ONLY)?;
    Ok(Json(
        state.services.assignments().available_for_rating(user.id).await?,
    ))
}

/// Rate an assigned course; rating again updates the earlier rating
#[utoipa::path(
    post,
    path = "/api/employee/rate-course/{course_id}",
    tag = "Employee",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = RateCourseRequest,
    responses(
        (status = 201, description = "Course rated", body = CourseRating),
        (status = 200, description = "Rating updated", body = CourseRating),
        (status = 400, description = "Rating must be between 1 and 5"),
        (status = 403, description = "Only employees can rate courses"),
        (status = 404, description = "Course not assigned to you")
    ),
    security(("bearer_auth" = []))
)]
pub async fn rate_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<RateCourseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CourseRating>>)> {
    require_role(&user, &[UserRole::Employee], "Only employees can rate courses")?;

    let upsert = state
        .services
        .ratings()
        .rate(user.id, course_id, body.rating, body.review)
        .await?;

    Ok(match upsert {
        RatingUpsert::Created(rating) => (
            StatusCode::CREATED,
            Json(ApiResponse::with_message(rating, "Course rated successfully")),
        ),
        RatingUpsert::Updated(rating) => (
            StatusCode::OK,
            Json(ApiResponse::with_message(rating, "Rating updated successfully")),
        ),
    })
}
