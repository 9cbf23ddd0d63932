//! Service Container - Centralized service access with parallel execution support.
//!
//! Handlers depend on the `ServiceContainer` trait, never on concrete
//! services, so the HTTP layer can be driven against fakes in tests.

use std::future::Future;
use std::sync::Arc;

use super::{
    AssessmentService, AssignmentService, AuthService, CourseService, RatingService,
    ReportService, RequestService, UploadService, UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{FileStore, LocalFileStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn requests(&self) -> Arc<dyn RequestService>;

    fn courses(&self) -> Arc<dyn CourseService>;

    fn assessments(&self) -> Arc<dyn AssessmentService>;

    fn assignments(&self) -> Arc<dyn AssignmentService>;

    fn ratings(&self) -> Arc<dyn RatingService>;

    fn reports(&self) -> Arc<dyn ReportService>;

    fn uploads(&self) -> Arc<dyn UploadService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    users: Arc<dyn UserService>,
    requests: Arc<dyn RequestService>,
    courses: Arc<dyn CourseService>,
    assessments: Arc<dyn AssessmentService>,
    assignments: Arc<dyn AssignmentService>,
    ratings: Arc<dyn RatingService>,
    reports: Arc<dyn ReportService>,
    uploads: Arc<dyn UploadService>,
}

impl Services {
    /// Wire every service over one database connection and the local upload directory.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        use super::{
            AssessmentBoard, AssignmentLedger, Authenticator, CourseCatalog, PdfLibrary,
            ProgressReports, RatingBook, RequestWorkflow, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));
        let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(config.upload_dir.clone()));

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            users: Arc::new(UserManager::new(uow.clone())),
            requests: Arc::new(RequestWorkflow::new(uow.clone())),
            courses: Arc::new(CourseCatalog::new(uow.clone(), files.clone())),
            assessments: Arc::new(AssessmentBoard::new(uow.clone())),
            assignments: Arc::new(AssignmentLedger::new(uow.clone())),
            ratings: Arc::new(RatingBook::new(uow.clone())),
            reports: Arc::new(ProgressReports::new(uow)),
            uploads: Arc::new(PdfLibrary::new(files, config.max_upload_bytes)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    fn requests(&self) -> Arc<dyn RequestService> {
        self.requests.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.courses.clone()
    }

    fn assessments(&self) -> Arc<dyn AssessmentService> {
        self.assessments.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentService> {
        self.assignments.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.ratings.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.reports.clone()
    }

    fn uploads(&self) -> Arc<dyn UploadService> {
        self.uploads.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
///
/// Used to fan out independent repository reads; the first error wins.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// # Example
    /// ```ignore
    /// let (managers, courses) = parallel::join2(
    ///     users.find_by_ids(manager_ids),
    ///     courses.find_by_requests(request_ids),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(
        f1: F1,
        f2: F2,
        f3: F3,
    ) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute four independent async operations in parallel.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }
}
