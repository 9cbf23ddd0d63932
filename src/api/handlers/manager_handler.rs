//! Manager dashboards: requests, the employee directory and progress.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use uuid::Uuid;

use crate::api::extractors::ValidPath;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    AssignmentProgress, CourseRatingSummary, RequestOverview, UserResponse, UserRole,
};
use crate::errors::AppResult;

const MANAGERS_ONLY: &str = "Only managers can access this";
const MANAGERS_AND_ADMINS: &str = "Only managers and admins can access this";

pub fn manager_routes() -> Router<AppState> {
    Router::new()
        .route("/my-requests", get(my_requests))
        .route("/employees", get(list_employees))
        .route("/employee/:employee_id", get(get_employee))
        .route("/course/:course_id/assigned-employees", get(assigned_employees))
        .route("/employee-progress/:employee_id/:course_id", get(employee_course_progress))
        .route("/all-employee-progress", get(all_employee_progress))
        .route("/course-ratings/:course_id", get(course_ratings))
}

/// Requests submitted by the caller
#[utoipa::path(
    get,
    path = "/api/manager/my-requests",
    tag = "Manager",
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
    require_role(&user, &[UserRole::Manager], MANAGERS_ONLY)?;
    Ok(Json(state.services.requests().list_for_manager(user.id).await?))
}

/// Every employee account
#[utoipa::path(
    get,
    path = "/api/manager/employees",
    tag = "Manager",
    responses(
        (status = 200, description = "Employees", body = [UserResponse]),
        (status = 403, description = "Only managers can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_role(&user, &[UserRole::Manager], MANAGERS_ONLY)?;
    let employees = state.services.users().list_employees().await?;
    Ok(Json(employees.into_iter().map(UserResponse::from).collect()))
}

/// One employee
#[utoipa::path(
    get,
    path = "/api/manager/employee/{employee_id}",
    tag = "Manager",
    params(("employee_id" = Uuid, Path, description = "Employee user ID")),
    responses(
        (status = 200, description = "Employee", body = UserResponse),
        (status = 403, description = "Only managers can access this"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(employee_id): ValidPath<Uuid>,
) -> AppResult<Json<UserResponse>> {
    require_role(&user, &[UserRole::Manager], MANAGERS_ONLY)?;
    let employee = state.services.users().get_employee(employee_id).await?;
    Ok(Json(UserResponse::from(employee)))
}

/// Ids of employees already assigned to a course
#[utoipa::path(
    get,
    path = "/api/manager/course/{course_id}/assigned-employees",
    tag = "Manager",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assigned employee ids", body = [Uuid]),
        (status = 403, description = "Only managers and admins can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn assigned_employees(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
) -> AppResult<Json<Vec<Uuid>>> {
    require_role(&user, &[UserRole::Manager, UserRole::Admin], MANAGERS_AND_ADMINS)?;
    Ok(Json(
        state.services.assignments().assigned_employee_ids(course_id).await?,
    ))
}

/// One employee's progress on one course
#[utoipa::path(
    get,
    path = "/api/manager/employee-progress/{employee_id}/{course_id}",
    tag = "Manager",
    params(
        ("employee_id" = Uuid, Path, description = "Employee user ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Progress", body = AssignmentProgress),
        (status = 403, description = "Only managers can access this"),
        (status = 404, description = "Employee not found or course not assigned")
    ),
    security(("bearer_auth" = []))
)]
pub async fn employee_course_progress(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath((employee_id, course_id)): ValidPath<(Uuid, Uuid)>,
) -> AppResult<Json<AssignmentProgress>> {
    require_role(&user, &[UserRole::Manager], MANAGERS_ONLY)?;
    let progress = state
        .services
        .reports()
        .employee_course_progress(employee_id, course_id)
        .await?;
    Ok(Json(progress))
}

/// Progress on every assignment
#[utoipa::path(
    get,
    path = "/api/manager/all-employee-progress",
    tag = "Manager",
    responses(
        (status = 200, description = "Progress of all assignments", body = [AssignmentProgress]),
        (status = 403, description = "Only managers can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn all_employee_progress(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<AssignmentProgress>>> {
    require_role(&user, &[UserRole::Manager], MANAGERS_ONLY)?;
    Ok(Json(state.services.reports().all_assignment_progress().await?))
}

/// Ratings of a course with their average
#[utoipa::path(
    get,
    path = "/api/manager/course-ratings/{course_id}",
    tag = "Manager",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course ratings", body = CourseRatingSummary),
        (status = 403, description = "Only managers and admins can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn course_ratings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
) -> AppResult<Json<CourseRatingSummary>> {
    require_role(&user, &[UserRole::Manager, UserRole::Admin], MANAGERS_AND_ADMINS)?;
    Ok(Json(state.services.ratings().course_ratings(course_id).await?))
}
