//! Course request handlers: Managers submit, Admins decide.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidPath, ValidatedJson};
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{CourseRequest, Decision, NewCourseRequest, RequestOverview, UserRole};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Course proposal submitted by a Manager
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CourseRequestBody {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Secure coding")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Concept is required"))]
    pub concept: String,
    #[validate(length(min = 1, message = "Duration is required"))]
    #[schema(example = "2 weeks")]
    pub duration: String,
}

pub fn course_request_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_request))
        .route("/requests", get(list_requests))
        .route("/request/:id", get(get_request))
        .route("/approve/:id", patch(approve_request))
        .route("/reject/:id", patch(reject_request))
        .route("/delete/:id", delete(delete_request))
        .route("/my-requests", get(my_requests))
}

/// Submit a course request
#[utoipa::path(
    post,
    path = "/api/course-requests/create",
    tag = "Course Requests",
    request_body = CourseRequestBody,
    responses(
        (status = 201, description = "Request submitted", body = CourseRequest),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only managers can submit course requests")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(body): ValidatedJson<CourseRequestBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<CourseRequest>>)> {
    require_role(&user, &[UserRole::Manager], "Only managers can submit course requests")?;

    let request = state
        .services
        .requests()
        .submit(
            user.id,
            NewCourseRequest {
                title: body.title,
                description: body.description,
                concept: body.concept,
                duration: body.duration,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            request,
            "Course creation request submitted successfully",
        )),
    ))
}

/// List every course request
#[utoipa::path(
    get,
    path = "/api/course-requests/requests",
    tag = "Course Requests",
    responses(
        (status = 200, description = "All requests", body = [RequestOverview]),
        (status = 403, description = "Only admins can view course requests")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<RequestOverview>>> {
    require_role(&user, &[UserRole::Admin], "Only admins can view course requests")?;
    Ok(Json(state.services.requests().list_all().await?))
}

/// Get one course request
#[utoipa::path(
    get,
    path = "/api/course-requests/request/{id}",
    tag = "Course Requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = RequestOverview),
        (status = 403, description = "Only admins can view course requests"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<RequestOverview>> {
    require_role(&user, &[UserRole::Admin], "Only admins can view course requests")?;
    Ok(Json(state.services.requests().get(id).await?))
}

/// Approve a pending request
#[utoipa::path(
    patch,
    path = "/api/course-requests/approve/{id}",
    tag = "Course Requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request approved", body = CourseRequest),
        (status = 400, description = "Request already decided"),
        (status = 403, description = "Only admins can approve course requests"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<ApiResponse<CourseRequest>>> {
    require_role(&user, &[UserRole::Admin], "Only admins can approve course requests")?;
    let request = state.services.requests().decide(id, Decision::Approve).await?;
    Ok(Json(ApiResponse::with_message(
        request,
        "Course request approved successfully",
    )))
}

/// Reject a pending request
#[utoipa::path(
    patch,
    path = "/api/course-requests/reject/{id}",
    tag = "Course Requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request rejected", body = CourseRequest),
        (status = 400, description = "Request already decided"),
        (status = 403, description = "Only admins can reject course requests"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reject_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<ApiResponse<CourseRequest>>> {
    require_role(&user, &[UserRole::Admin], "Only admins can reject course requests")?;
    let request = state.services.requests().decide(id, Decision::Reject).await?;
    Ok(Json(ApiResponse::with_message(
        request,
        "Course request rejected successfully",
    )))
}

/// Delete a rejected request
#[utoipa::path(
    delete,
    path = "/api/course-requests/delete/{id}",
    tag = "Course Requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted"),
        (status = 400, description = "Only rejected course requests can be deleted"),
        (status = 403, description = "Only admins can delete course requests"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_role(&user, &[UserRole::Admin], "Only admins can delete course requests")?;
    state.services.requests().delete(id).await?;
    Ok(Json(ApiResponse::message(
        "Rejected course request deleted successfully",
    )))
}

/// The calling manager's own requests
#[utoipa::path(
    get,
    path = "/api/course-requests/my-requests",
    tag = "Course Requests",
    responses(
        (status = 200, description = "Own requests", body = [RequestOverview]),
        (status = 403, description = "Only managers can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<RequestOverview>>> {
    require_role(&user, &[UserRole::Manager], "Only managers can access this")?;
    Ok(Json(state.services.requests().list_for_manager(user.id).await?))
}
