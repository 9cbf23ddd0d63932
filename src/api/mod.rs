//! HTTP surface of the portal.
//!
//! Route groups mirror the portal roles (`/api/employee`, `/api/manager`,
//! `/api/admin`) plus the shared workflows. Role rules are checked inside
//! each handler with [`middleware::require_role`] after the bearer token
//! has been verified by [`middleware::auth_middleware`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
