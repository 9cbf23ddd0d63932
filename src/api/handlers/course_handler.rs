//! Course handlers: creation from approved requests, edits and the catalog.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidPath, ValidatedJson};
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{Course, CourseContent, CourseWithAuthor, UserRole};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Course material; every text field is required
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    #[validate(length(min = 1, message = "All course fields are required"))]
    pub title: String,
    #[validate(length(min = 1, message = "All course fields are required"))]
    pub description: String,
    #[validate(length(min = 1, message = "All course fields are required"))]
    pub concept: String,
    #[validate(length(min = 1, message = "All course fields are required"))]
    pub duration: String,
    #[schema(example = "https://videos.example.com/secure-coding")]
    pub video_link: Option<String>,
    /// Usually a `/uploads/pdfs/...` URL returned by the upload endpoint
    pub pdf_link: Option<String>,
}

impl From<CourseBody> for CourseContent {
    fn from(body: CourseBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            concept: body.concept,
            duration: body.duration,
            video_link: body.video_link,
            pdf_link: body.pdf_link,
        }
    }
}

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/create/:request_id", post(create_course))
        .route("/edit/:course_id", put(edit_course))
        .route("/all", get(list_courses))
}

/// Create the course for an approved request
#[utoipa::path(
    post,
    path = "/api/courses/create/{request_id}",
    tag = "Courses",
    params(("request_id" = Uuid, Path, description = "Approved course request ID")),
    request_body = CourseBody,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error or request not approved"),
        (status = 403, description = "Only admins can create courses"),
        (status = 404, description = "Course request not found"),
        (status = 409, description = "Course already created for this request")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(request_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CourseBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<Course>>)> {
    require_role(&user, &[UserRole::Admin], "Only admins can create courses")?;

    let course = state
        .services
        .courses()
        .create(user.id, request_id, body.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(course, "Course created successfully")),
    ))
}

/// Edit a course
#[utoipa::path(
    put,
    path = "/api/courses/edit/{course_id}",
    tag = "Courses",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = CourseBody,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only admins can edit courses"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CourseBody>,
) -> AppResult<Json<ApiResponse<Course>>> {
    require_role(&user, &[UserRole::Admin], "Only admins can edit courses")?;

    let course = state.services.courses().edit(course_id, body.into()).await?;
    Ok(Json(ApiResponse::with_message(course, "Course updated successfully")))
}

/// Every course with its author
#[utoipa::path(
    get,
    path = "/api/courses/all",
    tag = "Courses",
    responses(
        (status = 200, description = "Course catalog", body = [CourseWithAuthor]),
        (status = 403, description = "Only managers and admins can view courses")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CourseWithAuthor>>> {
    require_role(
        &user,
        &[UserRole::Manager, UserRole::Admin],
        "Only managers and admins can view courses",
    )?;
    Ok(Json(state.services.courses().list().await?))
}
