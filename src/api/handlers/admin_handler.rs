//! Admin dashboards.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use uuid::Uuid;

use crate::api::extractors::ValidPath;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    CourseRatingSummary, CourseReport, DashboardStats, EmployeeProgress, UserResponse, UserRole,
};
use crate::errors::AppResult;

const ADMINS_ONLY: &str = "Only admins can access this";

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/courses", get(course_stats))
        .route("/employee-progress", get(employee_progress))
        .route("/course-ratings/:course_id", get(course_ratings))
        .route("/dashboard-stats", get(dashboard_stats))
}

/// Employee accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "Employees", body = [UserResponse]),
        (status = 403, description = "Only admins can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_role(&user, &[UserRole::Admin], ADMINS_ONLY)?;
    let employees = state.services.users().list_employees().await?;
    Ok(Json(employees.into_iter().map(UserResponse::from).collect()))
}

/// Every course with assignment, assessment and rating statistics
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    tag = "Admin",
    responses(
        (status = 200, description = "Course statistics", body = [CourseReport]),
        (status = 403, description = "Only admins can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn course_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CourseReport>>> {
    require_role(&user, &[UserRole::Admin], ADMINS_ONLY)?;
    Ok(Json(state.services.reports().course_stats().await?))
}

/// Per-employee progress across assigned courses
#[utoipa::path(
    get,
    path = "/api/admin/employee-progress",
    tag = "Admin",
    responses(
        (status = 200, description = "Employee progress", body = [EmployeeProgress]),
        (status = 403, description = "Only admins can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn employee_progress(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<EmployeeProgress>>> {
    require_role(&user, &[UserRole::Admin], ADMINS_ONLY)?;
    Ok(Json(state.services.reports().employee_progress().await?))
}

/// Ratings of a course with their average
#[utoipa::path(
    get,
    path = "/api/admin/course-ratings/{course_id}",
    tag = "Admin",
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
    require_role(
        &user,
        &[UserRole::Manager, UserRole::Admin],
        "Only managers and admins can access this",
    )?;
    Ok(Json(state.services.ratings().course_ratings(course_id).await?))
}

/// Portal-wide counts
#[utoipa::path(
    get,
    path = "/api/admin/dashboard-stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 403, description = "Only admins can access this")
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<DashboardStats>> {
    require_role(&user, &[UserRole::Admin], ADMINS_ONLY)?;
    Ok(Json(state.services.reports().dashboard().await?))
}
