//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Unit of Work for repository access
//! - Local file storage for uploaded PDFs

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AssessmentRepository, AssignmentRepository, AttemptRepository, CourseRepository,
    CourseRequestRepository, RatingRepository, UserRepository,
};
pub use storage::{FileStore, LocalFileStore, StoredFile};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAssessmentRepository, MockAssignmentRepository, MockAttemptRepository,
    MockCourseRepository, MockCourseRequestRepository, MockRatingRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockFileStore;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
