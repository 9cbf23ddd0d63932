//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, assessment_handler, assignment_handler, auth_handler, course_handler,
    course_request_handler, employee_handler, manager_handler, upload_handler,
};
use crate::domain::{
    Assessment, AssessmentCounts, AssessmentView, Assignment, AssignmentCounts, AssignmentIssue,
    AssignmentOutcome, AssignmentProgress, Attempt, AttemptAnswer, AttemptResult, AttemptSummary,
    Course, CourseCounts, CourseRating, CourseRatingSummary, CourseReport, CourseRequest,
    CourseStats, CourseWithAuthor, DashboardStats, EmployeeProfile, EmployeeProgress,
    EnrolledCourse, PublicAssessment, PublicQuestion, Question, RateableCourse, RatingCounts,
    RatingEntry, RatingSnapshot, RequestCounts, RequestOverview, RequestStatus, SelectedOption,
    UserCounts, UserResponse, UserRole, UserSummary,
};
use crate::infra::StoredFile;
use crate::services::TokenResponse;

/// OpenAPI documentation for the Learning Portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Learning Portal API",
        version = "0.1.0",
        description = "Corporate training: course requests, assignments, assessments and ratings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::get_profile,
        auth_handler::update_profile,
        course_request_handler::create_request,
        course_request_handler::list_requests,
        course_request_handler::get_request,
        course_request_handler::approve_request,
        course_request_handler::reject_request,
        course_request_handler::delete_request,
        course_request_handler::my_requests,
        course_handler::create_course,
        course_handler::edit_course,
        course_handler::list_courses,
        assessment_handler::create_assessment,
        assessment_handler::edit_assessment,
        assessment_handler::get_assessment,
        assessment_handler::list_course_assessments,
        assignment_handler::assign_course,
        employee_handler::my_courses,
        employee_handler::update_progress,
        employee_handler::complete_course,
        employee_handler::course_assessments,
        employee_handler::submit_assessment,
        employee_handler::available_for_rating,
        employee_handler::rate_course,
        manager_handler::my_requests,
        manager_handler::list_employees,
        manager_handler::get_employee,
        manager_handler::assigned_employees,
        manager_handler::employee_course_progress,
        manager_handler::all_employee_progress,
        manager_handler::course_ratings,
        admin_handler::list_users,
        admin_handler::course_stats,
        admin_handler::employee_progress,
        admin_handler::course_ratings,
        admin_handler::dashboard_stats,
        upload_handler::upload_pdf,
        upload_handler::list_pdfs,
        upload_handler::delete_pdf,
    ),
    components(
        schemas(
            // Users
            UserRole,
            UserResponse,
            UserSummary,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::UpdateProfileRequest,
            // Requests and courses
            RequestStatus,
            CourseRequest,
            RequestOverview,
            Course,
            CourseWithAuthor,
            course_request_handler::CourseRequestBody,
            course_handler::CourseBody,
            // Assessments
            Question,
            Assessment,
            PublicQuestion,
            PublicAssessment,
            AssessmentView,
            SelectedOption,
            AttemptAnswer,
            Attempt,
            AttemptResult,
            assessment_handler::QuestionBody,
            assessment_handler::AssessmentBody,
            // Assignments and ratings
            Assignment,
            AssignmentIssue,
            AssignmentOutcome,
            CourseRating,
            RatingEntry,
            CourseRatingSummary,
            assignment_handler::AssignCourseRequest,
            employee_handler::ProgressRequest,
            employee_handler::SubmitAssessmentRequest,
            employee_handler::RateCourseRequest,
            // Reports
            AttemptSummary,
            RatingSnapshot,
            AssignmentProgress,
            EnrolledCourse,
            RateableCourse,
            CourseStats,
            CourseReport,
            EmployeeProfile,
            EmployeeProgress,
            UserCounts,
            RequestCounts,
            CourseCounts,
            AssignmentCounts,
            AssessmentCounts,
            RatingCounts,
            DashboardStats,
            // Uploads
            StoredFile,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Course Requests", description = "Manager requests and admin decisions"),
        (name = "Courses", description = "Courses created from approved requests"),
        (name = "Assessments", description = "Course assessments"),
        (name = "Assignments", description = "Assigning courses to employees"),
        (name = "Employee", description = "Learning, attempts and ratings"),
        (name = "Manager", description = "Manager dashboards"),
        (name = "Admin", description = "Admin dashboards"),
        (name = "Uploads", description = "Course PDF storage")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
