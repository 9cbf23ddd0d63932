//! Application route configuration.

use axum::{middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_routes, assessment_routes, assignment_routes, auth_routes, course_request_routes,
    course_routes, employee_routes, manager_routes, upload_routes, view_assessment_routes,
};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::UPLOADS_URL_PREFIX;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Every group except `/api/auth` requires a valid bearer token
    let protected = |routes: Router<AppState>| {
        routes.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/course-requests", protected(course_request_routes()))
        .nest("/api/courses", protected(course_routes()))
        .nest("/api/assessments", protected(assessment_routes()))
        .nest("/api/course", protected(assignment_routes()))
        .nest("/api/view-assessments", protected(view_assessment_routes()))
        .nest("/api/employee", protected(employee_routes()))
        .nest("/api/manager", protected(manager_routes()))
        .nest("/api/admin", protected(admin_routes()))
        .nest("/api/upload", protected(upload_routes(state.max_upload_bytes)))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&state.upload_dir))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Learning Portal API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// Liveness probe; does not touch the database
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    })
}
