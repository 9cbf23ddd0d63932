//! Progress reports and dashboard statistics for Managers and Admins.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    average_rating, AssessmentCounts, AssignmentCounts, AssignmentProgress, CourseCounts,
    CourseReport, DashboardStats, EmployeeProgress, RatingCounts, ReportSnapshot, RequestCounts,
    RequestStatus, User, UserCounts, UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ReportService: Send + Sync {
    /// One employee's standing on one assigned course.
    async fn employee_course_progress(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<AssignmentProgress>;

    async fn all_assignment_progress(&self) -> AppResult<Vec<AssignmentProgress>>;

    async fn course_stats(&self) -> AppResult<Vec<CourseReport>>;

    async fn employee_progress(&self) -> AppResult<Vec<EmployeeProgress>>;

    async fn dashboard(&self) -> AppResult<DashboardStats>;
}

pub struct ProgressReports<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProgressReports<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn snapshot(&self) -> AppResult<ReportSnapshot> {
        let users = self.uow.users();
        let courses = self.uow.courses();
        let assignments = self.uow.assignments();
        let assessments = self.uow.assessments();
        let attempts = self.uow.attempts();
        let ratings = self.uow.ratings();

        let ((users, courses, assignments), (assessments, attempts, ratings)) = parallel::join2(
            parallel::join3(users.list(), courses.list(), assignments.list()),
            parallel::join3(assessments.list(), attempts.list(), ratings.list()),
        )
        .await?;

        Ok(ReportSnapshot {
            users,
            courses,
            assignments,
            assessments,
            attempts,
            ratings,
        })
    }

    async fn user_counts(&self) -> AppResult<UserCounts> {
        let users = self.uow.users();
        let (total, admins, managers, employees) = parallel::join4(
            users.count(None),
            users.count(Some(UserRole::Admin)),
            users.count(Some(UserRole::Manager)),
            users.count(Some(UserRole::Employee)),
        )
        .await?;

        Ok(UserCounts {
            total: total as usize,
            admins: admins as usize,
            managers: managers as usize,
            employees: employees as usize,
        })
    }

    async fn request_counts(&self) -> AppResult<RequestCounts> {
        let requests = self.uow.requests();
        let (total, pending, approved, rejected) = parallel::join4(
            requests.count(None),
            requests.count(Some(RequestStatus::Pending)),
            requests.count(Some(RequestStatus::Approved)),
            requests.count(Some(RequestStatus::Rejected)),
        )
        .await?;

        Ok(RequestCounts {
            total: total as usize,
            pending: pending as usize,
            approved: approved as usize,
            rejected: rejected as usize,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ProgressReports<U> {
    async fn employee_course_progress(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<AssignmentProgress> {
        let employee = self
            .uow
            .users()
            .find_by_id(employee_id)
            .await?
            .filter(User::is_employee)
            .ok_or_not_found("Employee")?;

        let assignment = self
            .uow
            .assignments()
            .find(course_id, employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not assigned to this employee".to_string()))?;

        let courses = self.uow.courses();
        let assessments = self.uow.assessments();
        let ratings = self.uow.ratings();
        let (course, assessment, rating) = parallel::join3(
            courses.find_by_id(course_id),
            assessments.find_by_course(course_id),
            ratings.find(course_id, employee_id),
        )
        .await?;

        let attempt = match &assessment {
            Some(assessment) => self.uow.attempts().find(assessment.id, employee_id).await?,
            None => None,
        };

        Ok(AssignmentProgress::build(
            &assignment,
            Some(employee.summary()),
            course,
            attempt.as_ref(),
            rating.as_ref(),
        ))
    }

    async fn all_assignment_progress(&self) -> AppResult<Vec<AssignmentProgress>> {
        Ok(self.snapshot().await?.all_progress())
    }

    async fn course_stats(&self) -> AppResult<Vec<CourseReport>> {
        Ok(self.snapshot().await?.course_reports())
    }

    async fn employee_progress(&self) -> AppResult<Vec<EmployeeProgress>> {
        Ok(self.snapshot().await?.employee_progress())
    }

    async fn dashboard(&self) -> AppResult<DashboardStats> {
        let (courses, assignments, assessments, attempts) = (
            self.uow.courses(),
            self.uow.assignments(),
            self.uow.assessments(),
            self.uow.attempts(),
        );

        let (users, requests, course_counts, assessment_counts) = parallel::join4(
            self.user_counts(),
            self.request_counts(),
            parallel::join3(
                courses.count(),
                assignments.count(None),
                assignments.count(Some(true)),
            ),
            parallel::join3(
                assessments.count(),
                attempts.count(None),
                attempts.count(Some(true)),
            ),
        )
        .await?;
        let (course_total, assigned, completed) = course_counts;
        let (assessment_total, attempted, passed) = assessment_counts;
        let ratings = self.uow.ratings().list().await?;

        tracing::debug!(users = users.total, courses = course_total, "Dashboard stats computed");

        Ok(DashboardStats {
            users,
            courses: CourseCounts {
                total: course_total as usize,
                requests,
            },
            assignments: AssignmentCounts::new(assigned as usize, completed as usize),
            assessments: AssessmentCounts::new(
                assessment_total as usize,
                attempted as usize,
                passed as usize,
            ),
            ratings: RatingCounts {
                total: ratings.len(),
                average: average_rating(&ratings),
            },
        })
    }
}
