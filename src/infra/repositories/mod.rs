//! Repository layer - Data access abstraction
//!
//! One trait per aggregate with a SeaORM-backed implementation. Services
//! only see the traits, reached through the unit of work.

mod assessment_repository;
mod assignment_repository;
mod attempt_repository;
mod course_repository;
mod course_request_repository;
pub(crate) mod entities;
mod rating_repository;
mod user_repository;

pub use assessment_repository::{AssessmentRepository, AssessmentStore};
pub use assignment_repository::{AssignmentRepository, AssignmentStore};
pub use attempt_repository::{AttemptRepository, AttemptStore};
pub use course_repository::{CourseRepository, CourseStore};
pub use course_request_repository::{CourseRequestRepository, CourseRequestStore};
pub use rating_repository::{RatingRepository, RatingStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use assessment_repository::MockAssessmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use assignment_repository::MockAssignmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use attempt_repository::MockAttemptRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use course_request_repository::MockCourseRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use rating_repository::MockRatingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
