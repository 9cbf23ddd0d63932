//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and infrastructure to fulfill the
//! portal's use cases. They reach storage only through the `UnitOfWork`
//! and `FileStore` abstractions.

mod assessment_service;
mod assignment_service;
mod auth_service;
pub mod container;
mod course_service;
mod rating_service;
mod report_service;
mod request_service;
mod upload_service;
mod user_service;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use assessment_service::{AssessmentBoard, AssessmentService};
pub use assignment_service::{AssignmentLedger, AssignmentService};
pub use auth_service::{
    AuthService, Authenticator, Claims, Registration, TokenCodec, TokenResponse,
};
pub use course_service::{CourseCatalog, CourseService};
pub use rating_service::{RatingBook, RatingService};
pub use report_service::{ProgressReports, ReportService};
pub use request_service::{RequestService, RequestWorkflow};
pub use upload_service::{PdfLibrary, UploadService};
pub use user_service::{ProfileUpdate, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
