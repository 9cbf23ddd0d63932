//! Assessments: Admin authoring, Employee submissions and scoring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Assessment, AssessmentDraft, AssessmentView, Attempt, PublicAssessment, SelectedOption,
    UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

const NOT_FOUND_FOR_COURSE: &str = "Assessment not found for this course";

#[async_trait]
pub trait AssessmentService: Send + Sync {
    async fn create(&self, course_id: Uuid, draft: AssessmentDraft) -> AppResult<Assessment>;

    /// Replace the course's assessment with the draft.
    async fn edit(&self, course_id: Uuid, draft: AssessmentDraft) -> AppResult<Assessment>;

    /// The course's assessment; answers are hidden from Employees.
    async fn for_course(&self, course_id: Uuid, viewer: UserRole) -> AppResult<AssessmentView>;

    /// Every assessment of a course, answers included.
    async fn list_for_course(&self, course_id: Uuid) -> AppResult<Vec<Assessment>>;

    /// Assessments of a course assigned to the employee, without answers.
    async fn list_for_employee(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<Vec<PublicAssessment>>;

    /// Score and store the employee's only attempt.
    async fn submit(
        &self,
        employee_id: Uuid,
        assessment_id: Uuid,
        answers: HashMap<Uuid, SelectedOption>,
    ) -> AppResult<Attempt>;
}

pub struct AssessmentBoard<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AssessmentBoard<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_course(&self, course_id: Uuid) -> AppResult<()> {
        self.uow
            .courses()
            .find_by_id(course_id)
            .await?
            .ok_or_not_found("Course")
            .map(|_| ())
    }
}

#[async_trait]
impl<U: UnitOfWork> AssessmentService for AssessmentBoard<U> {
    async fn create(&self, course_id: Uuid, draft: AssessmentDraft) -> AppResult<Assessment> {
        self.ensure_course(course_id).await?;
        draft.validate()?;

        let assessment = self
            .uow
            .assessments()
            .create(Assessment::from_draft(course_id, draft))
            .await?;
        tracing::info!(assessment_id = %assessment.id, course_id = %course_id, "Assessment created");
        Ok(assessment)
    }

    async fn edit(&self, course_id: Uuid, draft: AssessmentDraft) -> AppResult<Assessment> {
        self.ensure_course(course_id).await?;

        let assessments = self.uow.assessments();
        let mut assessment = assessments
            .find_by_course(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_FOR_COURSE.to_string()))?;

        draft.validate()?;
        assessment.replace(draft);

        let assessment = assessments.save(assessment).await?;
        tracing::info!(assessment_id = %assessment.id, "Assessment updated");
        Ok(assessment)
    }

    async fn for_course(&self, course_id: Uuid, viewer: UserRole) -> AppResult<AssessmentView> {
        let assessment = self
            .uow
            .assessments()
            .find_by_course(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_FOR_COURSE.to_string()))?;

        Ok(if viewer.is_privileged() {
            AssessmentView::Full(assessment)
        } else {
            AssessmentView::Public(PublicAssessment::from(&assessment))
        })
    }

    async fn list_for_course(&self, course_id: Uuid) -> AppResult<Vec<Assessment>> {
        let assessments = self.uow.assessments().list_by_course(course_id).await?;
        if assessments.is_empty() {
            return Err(AppError::NotFound(
                "No assessments found for this course".to_string(),
            ));
        }
        Ok(assessments)
    }

    async fn list_for_employee(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
    ) -> AppResult<Vec<PublicAssessment>> {
        let assigned = self
            .uow
            .assignments()
            .find(course_id, employee_id)
            .await?
            .is_some();
        if !assigned {
            return Err(AppError::forbidden("Course not assigned to you"));
        }

        let assessments = self.uow.assessments().list_by_course(course_id).await?;
        Ok(assessments.iter().map(PublicAssessment::from).collect())
    }

    async fn submit(
        &self,
        employee_id: Uuid,
        assessment_id: Uuid,
        answers: HashMap<Uuid, SelectedOption>,
    ) -> AppResult<Attempt> {
        let attempts = self.uow.attempts();
        if attempts.find(assessment_id, employee_id).await?.is_some() {
            return Err(AppError::bad_request(
                "You have already attempted this assessment",
            ));
        }

        let assessment = self
            .uow
            .assessments()
            .find_by_id(assessment_id)
            .await?
            .ok_or_not_found("Assessment")?;

        let grade = assessment.grade(&answers);
        let attempt = attempts
            .create(Attempt::record(&assessment, employee_id, grade))
            .await?;

        tracing::info!(
            attempt_id = %attempt.id,
            employee_id = %employee_id,
            score = attempt.score,
            passed = attempt.is_passed,
            "Assessment submitted"
        );
        Ok(attempt)
    }
}
