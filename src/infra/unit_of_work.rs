//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository so services depend on a single
//! seam. Multi-row workflows (bulk assignment, attempt scoring, rating
//! upserts) run as independent statements; there is no transaction scope.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    AssessmentRepository, AssessmentStore, AssignmentRepository, AssignmentStore,
    AttemptRepository, AttemptStore, CourseRepository, CourseRequestRepository,
    CourseRequestStore, CourseStore, RatingRepository, RatingStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn requests(&self) -> Arc<dyn CourseRequestRepository>;

    fn courses(&self) -> Arc<dyn CourseRepository>;

    fn assignments(&self) -> Arc<dyn AssignmentRepository>;

    fn assessments(&self) -> Arc<dyn AssessmentRepository>;

    fn attempts(&self) -> Arc<dyn AttemptRepository>;

    fn ratings(&self) -> Arc<dyn RatingRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    request_repo: Arc<CourseRequestStore>,
    course_repo: Arc<CourseStore>,
    assignment_repo: Arc<AssignmentStore>,
    assessment_repo: Arc<AssessmentStore>,
    attempt_repo: Arc<AttemptStore>,
    rating_repo: Arc<RatingStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            request_repo: Arc::new(CourseRequestStore::new(db.clone())),
            course_repo: Arc::new(CourseStore::new(db.clone())),
            assignment_repo: Arc::new(AssignmentStore::new(db.clone())),
            assessment_repo: Arc::new(AssessmentStore::new(db.clone())),
            attempt_repo: Arc::new(AttemptStore::new(db.clone())),
            rating_repo: Arc::new(RatingStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn requests(&self) -> Arc<dyn CourseRequestRepository> {
        self.request_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        self.assignment_repo.clone()
    }

    fn assessments(&self) -> Arc<dyn AssessmentRepository> {
        self.assessment_repo.clone()
    }

    fn attempts(&self) -> Arc<dyn AttemptRepository> {
        self.attempt_repo.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.rating_repo.clone()
    }
}
