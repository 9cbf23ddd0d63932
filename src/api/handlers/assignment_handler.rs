//! Bulk course assignment.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{AssignmentOutcome, UserRole};
use crate::errors::AppResult;
use crate::types::ApiResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignCourseRequest {
    pub course_id: Uuid,
    pub employee_ids: Vec<Uuid>,
}

pub fn assignment_routes() -> Router<AppState> {
    Router::new().route("/assign", post(assign_course))
}

/// Assign a course to employees
///
/// Employees that cannot be assigned are reported in `errors`; the call
/// fails with 400 only when nobody was assigned.
#[utoipa::path(
    post,
    path = "/api/course/assign",
    tag = "Assignments",
    request_body = AssignCourseRequest,
    responses(
        (status = 201, description = "Courses assigned", body = AssignmentOutcome),
        (status = 400, description = "Empty employee list or no valid assignments made"),
        (status = 403, description = "Only managers can assign courses"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn assign_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(body): ValidatedJson<AssignCourseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AssignmentOutcome>>)> {
    require_role(&user, &[UserRole::Manager], "Only managers can assign courses")?;

    let outcome = state
        .services
        .assignments()
        .assign(user.id, body.course_id, body.employee_ids)
        .await?;

    if outcome.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure(outcome, "No valid assignments made")),
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(outcome, "Courses assigned successfully")),
    ))
}
