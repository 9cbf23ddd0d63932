//! Course assignments and employee progress.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    validate_progress, Assessment, Assignment, AssignmentIssue, AssignmentOutcome, Course,
    EnrolledCourse, RateableCourse,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Assign a course to several employees. Each rejected id is reported
    /// in the outcome instead of failing the whole call.
    async fn assign(
        &self,
        manager_id: Uuid,
        course_id: Uuid,
        employee_ids: Vec<Uuid>,
    ) -> AppResult<AssignmentOutcome>;

    async fn assigned_employee_ids(&self, course_id: Uuid) -> AppResult<Vec<Uuid>>;

    async fn update_progress(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
        progress: i32,
    ) -> AppResult<Assignment>;

    async fn complete(&self, employee_id: Uuid, course_id: Uuid) -> AppResult<Assignment>;

    async fn my_courses(&self, employee_id: Uuid) -> AppResult<Vec<EnrolledCourse>>;

    async fn available_for_rating(&self, employee_id: Uuid) -> AppResult<Vec<RateableCourse>>;
}

pub struct AssignmentLedger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AssignmentLedger<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find_assignment(&self, employee_id: Uuid, course_id: Uuid) -> AppResult<Assignment> {
        self.uow
            .assignments()
            .find(course_id, employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not assigned".to_string()))
    }

    async fn courses_of(&self, assignments: &[Assignment]) -> AppResult<HashMap<Uuid, Course>> {
        let ids: Vec<Uuid> = assignments.iter().map(|a| a.course_id).collect();
        let courses = self.uow.courses().find_by_ids(ids).await?;
        Ok(courses.into_iter().map(|c| (c.id, c)).collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> AssignmentService for AssignmentLedger<U> {
    async fn assign(
        &self,
        manager_id: Uuid,
        course_id: Uuid,
        employee_ids: Vec<Uuid>,
    ) -> AppResult<AssignmentOutcome> {
        if employee_ids.is_empty() {
            return Err(AppError::bad_request(
                "Employee IDs should be an array and not empty",
            ));
        }

        self.uow
            .courses()
            .find_by_id(course_id)
            .await?
            .ok_or_not_found("Course")?;

        let users = self.uow.users();
        let assignments = self.uow.assignments();
        let mut outcome = AssignmentOutcome::default();

        for employee_id in employee_ids {
            let is_employee = users
                .find_by_id(employee_id)
                .await?
                .is_some_and(|u| u.is_employee());
            if !is_employee {
                tracing::debug!(employee_id = %employee_id, "Skipping non-employee");
                outcome.errors.push(AssignmentIssue::not_an_employee(employee_id));
                continue;
            }

            if let Some(existing) = assignments.find(course_id, employee_id).await? {
                tracing::debug!(employee_id = %employee_id, course_id = %course_id, "Already assigned");
                outcome.errors.push(AssignmentIssue::already_assigned(&existing));
                continue;
            }

            let created = assignments
                .create(Assignment::new(course_id, employee_id, manager_id))
                .await?;
            outcome.assignments.push(created);
        }

        tracing::info!(
            course_id = %course_id,
            created = outcome.assignments.len(),
            skipped = outcome.errors.len(),
            "Course assignment processed"
        );
        Ok(outcome)
    }

    async fn assigned_employee_ids(&self, course_id: Uuid) -> AppResult<Vec<Uuid>> {
        let assignments = self.uow.assignments().list_by_course(course_id).await?;
        Ok(assignments.into_iter().map(|a| a.employee_id).collect())
    }

    async fn update_progress(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
        progress: i32,
    ) -> AppResult<Assignment> {
        validate_progress(progress)?;

        let mut assignment = self.find_assignment(employee_id, course_id).await?;
        let was_completed = assignment.is_completed;
        assignment.record_progress(progress)?;

        let saved = self.uow.assignments().save(assignment).await?;
        if saved.is_completed && !was_completed {
            tracing::info!(employee_id = %employee_id, course_id = %course_id, "Course completed");
        }
        Ok(saved)
    }

    async fn complete(&self, employee_id: Uuid, course_id: Uuid) -> AppResult<Assignment> {
        let mut assignment = self.find_assignment(employee_id, course_id).await?;
        assignment.complete();

        let saved = self.uow.assignments().save(assignment).await?;
        tracing::info!(employee_id = %employee_id, course_id = %course_id, "Course marked as completed");
        Ok(saved)
    }

    async fn my_courses(&self, employee_id: Uuid) -> AppResult<Vec<EnrolledCourse>> {
        let assignments = self.uow.assignments().list_by_employee(employee_id).await?;
        let course_ids: Vec<Uuid> = assignments.iter().map(|a| a.course_id).collect();

        let assessment_repo = self.uow.assessments();
        let attempt_repo = self.uow.attempts();
        let rating_repo = self.uow.ratings();
        let (courses, assessments, attempts, ratings) = parallel::join4(
            self.courses_of(&assignments),
            assessment_repo.list_by_courses(course_ids),
            attempt_repo.list_by_employee(employee_id),
            rating_repo.list_by_employee(employee_id),
        )
        .await?;

        // First-created assessment per course; the list arrives oldest first.
        let mut primary: HashMap<Uuid, &Assessment> = HashMap::new();
        for assessment in &assessments {
            primary.entry(assessment.course_id).or_insert(assessment);
        }

        Ok(assignments
            .into_iter()
            .map(|assignment| {
                let is_completed_assessment = primary
                    .get(&assignment.course_id)
                    .is_some_and(|assessment| {
                        attempts
                            .iter()
                            .any(|t| t.assessment_id == assessment.id && t.is_assessment_completed)
                    });
                let is_rated = ratings.iter().any(|r| r.course_id == assignment.course_id);
                EnrolledCourse {
                    course: courses.get(&assignment.course_id).cloned(),
                    assignment,
                    is_completed_assessment,
                    is_rated,
                }
            })
            .collect())
    }

    async fn available_for_rating(&self, employee_id: Uuid) -> AppResult<Vec<RateableCourse>> {
        let assignments = self.uow.assignments().list_by_employee(employee_id).await?;
        let courses = self.courses_of(&assignments).await?;

        Ok(assignments
            .iter()
            .filter_map(|assignment| {
                let course = courses.get(&assignment.course_id)?;
                Some(RateableCourse {
                    course_id: course.id,
                    title: course.title.clone(),
                    is_completed: assignment.is_completed,
                    progress: assignment.progress,
                    assigned_at: assignment.assigned_at,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{
        AssessmentDraft, Attempt, CourseContent, CourseRating, QuestionDraft, User, UserRole,
    };
    use crate::infra::repositories::{
        MockAssessmentRepository, MockAssignmentRepository, MockAttemptRepository,
        MockCourseRepository, MockRatingRepository, MockUserRepository,
    };
    use crate::infra::unit_of_work::MockUnitOfWork;
    use crate::infra::{
        AssessmentRepository, AssignmentRepository, AttemptRepository, CourseRepository,
        RatingRepository, UserRepository,
    };

    #[derive(Default)]
    struct Repos {
        users: MockUserRepository,
        courses: MockCourseRepository,
        assignments: MockAssignmentRepository,
        assessments: MockAssessmentRepository,
        attempts: MockAttemptRepository,
        ratings: MockRatingRepository,
    }

    fn ledger(repos: Repos) -> AssignmentLedger<MockUnitOfWork> {
        let mut uow = MockUnitOfWork::new();
        uow.expect_users()
            .return_const(Arc::new(repos.users) as Arc<dyn UserRepository>);
        uow.expect_courses()
            .return_const(Arc::new(repos.courses) as Arc<dyn CourseRepository>);
        uow.expect_assignments()
            .return_const(Arc::new(repos.assignments) as Arc<dyn AssignmentRepository>);
        uow.expect_assessments()
            .return_const(Arc::new(repos.assessments) as Arc<dyn AssessmentRepository>);
        uow.expect_attempts()
            .return_const(Arc::new(repos.attempts) as Arc<dyn AttemptRepository>);
        uow.expect_ratings()
            .return_const(Arc::new(repos.ratings) as Arc<dyn RatingRepository>);
        AssignmentLedger::new(Arc::new(uow))
    }

    fn user(id: Uuid, role: UserRole) -> User {
        User {
            id,
            employee_code: "E-7".to_string(),
            name: "Jordan".to_string(),
            email: format!("{}@example.com", id),
            designation: "Developer".to_string(),
            username: id.to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(id: Uuid, title: &str) -> Course {
        let mut course = Course::from_content(
            CourseContent {
                title: title.to_string(),
                description: "desc".to_string(),
                concept: "concept".to_string(),
                duration: "1 week".to_string(),
                video_link: None,
                pdf_link: None,
            },
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        course.id = id;
        course
    }

    fn known_course() -> MockCourseRepository {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(course(id, "Onboarding"))));
        courses
    }

    #[tokio::test]
    async fn test_assign_rejects_empty_list() {
        let err = ledger(Repos::default())
            .assign(Uuid::new_v4(), Uuid::new_v4(), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_assign_requires_course() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));

        let err = ledger(Repos { courses, ..Default::default() })
            .assign(Uuid::new_v4(), Uuid::new_v4(), vec![Uuid::new_v4()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_assign_collects_per_item_errors() {
        let manager_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        let already = Uuid::new_v4();
        let manager = Uuid::new_v4();
        let missing = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |id| {
            Ok(if id == missing {
                None
            } else if id == manager {
                Some(user(id, UserRole::Manager))
            } else {
                Some(user(id, UserRole::Employee))
            })
        });

        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_find().returning(move |course_id, employee_id| {
            Ok((employee_id == already)
                .then(|| Assignment::new(course_id, employee_id, Uuid::new_v4())))
        });
        assignments
            .expect_create()
            .times(1)
            .returning(|assignment| Ok(assignment));

        let outcome = ledger(Repos {
            users,
            courses: known_course(),
            assignments,
            ..Default::default()
        })
        .assign(manager_id, course_id, vec![fresh, already, manager, missing])
        .await
        .unwrap();

        assert_eq!(outcome.assignments.len(), 1);
        assert_eq!(outcome.assignments[0].employee_id, fresh);
        assert_eq!(outcome.assignments[0].assigned_by, manager_id);
        assert_eq!(outcome.errors.len(), 3);
        assert_eq!(outcome.errors[0].employee_id, already);
        assert!(outcome.errors[0].assigned_on.is_some());
        assert_eq!(
            outcome.errors[1].message,
            "Invalid employee ID or user is not an employee"
        );
        assert_eq!(outcome.errors[2].employee_id, missing);
    }

    #[tokio::test]
    async fn test_progress_validated_before_lookup() {
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_find().never();

        let err = ledger(Repos { assignments, ..Default::default() })
            .update_progress(Uuid::new_v4(), Uuid::new_v4(), 101)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_progress_to_full_completes() {
        let employee_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();

        let mut assignments = MockAssignmentRepository::new();
        assignments
            .expect_find()
            .with(eq(course_id), eq(employee_id))
            .returning(|course_id, employee_id| {
                Ok(Some(Assignment::new(course_id, employee_id, Uuid::new_v4())))
            });
        assignments.expect_save().returning(|assignment| Ok(assignment));

        let saved = ledger(Repos { assignments, ..Default::default() })
            .update_progress(employee_id, course_id, 100)
            .await
            .unwrap();
        assert!(saved.is_completed);
        assert!(saved.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_progress_on_unassigned_course() {
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_find().returning(|_, _| Ok(None));

        let err = ledger(Repos { assignments, ..Default::default() })
            .complete(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Course not assigned"));
    }

    #[tokio::test]
    async fn test_my_courses_flags() {
        let employee_id = Uuid::new_v4();
        let tested = Uuid::new_v4();
        let rated = Uuid::new_v4();

        let assessment = Assessment::from_draft(
            tested,
            AssessmentDraft {
                total_marks: 10.0,
                passing_marks: 5.0,
                number_of_questions: 1,
                questions: vec![QuestionDraft {
                    question_text: "Q".into(),
                    options: vec!["yes".into(), "no".into()],
                    correct_answer: 0,
                }],
            },
        );
        let attempt = Attempt::record(
            &assessment,
            employee_id,
            assessment.grade(&HashMap::new()),
        );

        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_list_by_employee().returning(move |employee_id| {
            Ok(vec![
                Assignment::new(tested, employee_id, Uuid::new_v4()),
                Assignment::new(rated, employee_id, Uuid::new_v4()),
            ])
        });
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_ids().returning(|ids| {
            Ok(ids.into_iter().map(|id| course(id, "Course")).collect())
        });
        let mut assessments = MockAssessmentRepository::new();
        assessments
            .expect_list_by_courses()
            .returning(move |_| Ok(vec![assessment.clone()]));
        let mut attempts = MockAttemptRepository::new();
        attempts
            .expect_list_by_employee()
            .returning(move |_| Ok(vec![attempt.clone()]));
        let mut ratings = MockRatingRepository::new();
        ratings.expect_list_by_employee().returning(move |employee_id| {
            Ok(vec![CourseRating::new(rated, employee_id, 4, None)])
        });

        let enrolled = ledger(Repos {
            courses,
            assignments,
            assessments,
            attempts,
            ratings,
            ..Default::default()
        })
        .my_courses(employee_id)
        .await
        .unwrap();

        assert_eq!(enrolled.len(), 2);
        assert!(enrolled[0].is_completed_assessment);
        assert!(!enrolled[0].is_rated);
        assert!(!enrolled[1].is_completed_assessment);
        assert!(enrolled[1].is_rated);
        assert!(enrolled.iter().all(|e| e.course.is_some()));
    }

    #[tokio::test]
    async fn test_available_for_rating_lists_titles() {
        let employee_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();

        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_list_by_employee().returning(move |employee_id| {
            let mut assignment = Assignment::new(course_id, employee_id, Uuid::new_v4());
            assignment.progress = 40;
            Ok(vec![assignment])
        });
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_ids().returning(|ids| {
            Ok(ids.into_iter().map(|id| course(id, "Data privacy")).collect())
        });

        let rateable = ledger(Repos { courses, assignments, ..Default::default() })
            .available_for_rating(employee_id)
            .await
            .unwrap();

        assert_eq!(rateable.len(), 1);
        assert_eq!(rateable[0].course_id, course_id);
        assert_eq!(rateable[0].title, "Data privacy");
        assert_eq!(rateable[0].progress, 40);
        assert!(!rateable[0].is_completed);
    }
}
