//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the rules that govern them: the request
//! approval state machine, course creation guards, progress completion,
//! assessment scoring and rating upserts. Nothing here touches storage.

pub mod assessment;
pub mod assignment;
pub mod course;
pub mod course_request;
pub mod password;
pub mod rating;
pub mod report;
pub mod user;

pub use assessment::{
    Assessment, AssessmentDraft, AssessmentView, Attempt, AttemptAnswer, AttemptResult, Grade,
    PublicAssessment, PublicQuestion, Question, QuestionDraft, SelectedOption,
};
pub use assignment::{validate_progress, Assignment, AssignmentIssue, AssignmentOutcome};
pub use course::{ensure_no_existing_course, Course, CourseContent, CourseWithAuthor};
pub use course_request::{CourseRequest, Decision, NewCourseRequest, RequestOverview, RequestStatus};
pub use password::Password;
pub use rating::{
    average_rating, validate_rating, CourseRating, CourseRatingSummary, RatingEntry, RatingUpsert,
};
pub use report::{
    percentage, AssessmentCounts, AssignmentCounts, AssignmentProgress, AttemptSummary,
    CourseCounts, CourseReport, CourseStats, DashboardStats, EmployeeProfile, EmployeeProgress,
    EnrolledCourse, RateableCourse, RatingCounts, RatingSnapshot, ReportSnapshot, RequestCounts,
    UserCounts,
};
pub use user::{NewUser, ProfileChanges, User, UserResponse, UserRole, UserSummary};
