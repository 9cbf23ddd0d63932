//! HTTP request handlers, one module per route group.

pub mod admin_handler;
pub mod assessment_handler;
pub mod assignment_handler;
pub mod auth_handler;
pub mod course_handler;
pub mod course_request_handler;
pub mod employee_handler;
pub mod manager_handler;
pub mod upload_handler;

pub use admin_handler::admin_routes;
pub use assessment_handler::{assessment_routes, view_assessment_routes};
pub use assignment_handler::assignment_routes;
pub use auth_handler::auth_routes;
pub use course_handler::course_routes;
pub use course_request_handler::course_request_routes;
pub use employee_handler::employee_routes;
pub use manager_handler::manager_routes;
pub use upload_handler::upload_routes;
