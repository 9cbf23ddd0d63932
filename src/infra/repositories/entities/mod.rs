//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod assessment;
pub mod assessment_attempt;
pub mod assigned_course;
pub mod course;
pub mod course_rating;
pub mod course_request;
pub mod user;
