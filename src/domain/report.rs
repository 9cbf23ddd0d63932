//! Read models for progress tracking and dashboards.
//!
//! Reports are assembled in memory from a [`ReportSnapshot`] so a whole
//! dashboard costs a handful of queries instead of one per row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    average_rating, Assessment, Assignment, Attempt, Course, CourseRating, User, UserSummary,
};

/// `part / whole` as a percentage, 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub score: f64,
    pub total_marks: f64,
    pub is_passed: bool,
    pub submission_date: DateTime<Utc>,
}

impl From<&Attempt> for AttemptSummary {
    fn from(attempt: &Attempt) -> Self {
        Self {
            score: attempt.score,
            total_marks: attempt.total_marks,
            is_passed: attempt.is_passed,
            submission_date: attempt.submission_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingSnapshot {
    pub rating: i32,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CourseRating> for RatingSnapshot {
    fn from(rating: &CourseRating) -> Self {
        Self {
            rating: rating.rating,
            review: rating.review.clone(),
            created_at: rating.created_at,
        }
    }
}

/// One employee's standing on one assigned course.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentProgress {
    pub employee: Option<UserSummary>,
    pub course: Option<Course>,
    pub progress: i32,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub assessment: Option<AttemptSummary>,
    pub rating: Option<RatingSnapshot>,
}

impl AssignmentProgress {
    pub fn build(
        assignment: &Assignment,
        employee: Option<UserSummary>,
        course: Option<Course>,
        attempt: Option<&Attempt>,
        rating: Option<&CourseRating>,
    ) -> Self {
        Self {
            employee,
            course,
            progress: assignment.progress,
            is_completed: assignment.is_completed,
            completed_at: assignment.completed_at,
            assessment: attempt.map(AttemptSummary::from),
            rating: rating.map(RatingSnapshot::from),
        }
    }
}

/// An employee's own view of an assigned course.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub course: Option<Course>,
    pub is_completed_assessment: bool,
    pub is_rated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateableCourse {
    pub course_id: Uuid,
    pub title: String,
    pub is_completed: bool,
    pub progress: i32,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    pub total_assigned: usize,
    pub completed: usize,
    pub completion_rate: f64,
    pub assessments_passed: usize,
    pub average_rating: f64,
    pub total_ratings: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    #[serde(flatten)]
    pub course: Course,
    pub author: Option<UserSummary>,
    pub has_assessment: bool,
    pub stats: CourseStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub designation: String,
}

impl From<&User> for EmployeeProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            designation: user.designation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProgress {
    pub employee: EmployeeProfile,
    pub courses_assigned: usize,
    pub courses_completed: usize,
    pub courses: Vec<AssignmentProgress>,
}

/// Everything a report may join over, loaded up front.
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub assignments: Vec<Assignment>,
    pub assessments: Vec<Assessment>,
    pub attempts: Vec<Attempt>,
    pub ratings: Vec<CourseRating>,
}

impl ReportSnapshot {
    pub fn all_progress(&self) -> Vec<AssignmentProgress> {
        let index = ReportIndex::new(self);
        self.assignments
            .iter()
            .map(|a| index.progress_of(a))
            .collect()
    }

    pub fn course_reports(&self) -> Vec<CourseReport> {
        let index = ReportIndex::new(self);

        self.courses
            .iter()
            .map(|course| {
                let assigned = index.assignments_by_course.get(&course.id);
                let total_assigned = assigned.map_or(0, Vec::len);
                let completed = assigned.map_or(0, |list| {
                    list.iter().filter(|a| a.is_completed).count()
                });
                let assessments = index.assessments_by_course.get(&course.id);
                let assessments_passed = assessments.map_or(0, |list| {
                    list.iter()
                        .map(|a| index.passed_by_assessment.get(&a.id).copied().unwrap_or(0))
                        .sum()
                });
                let ratings = index
                    .ratings_by_course
                    .get(&course.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                CourseReport {
                    course: course.clone(),
                    author: index.users.get(&course.created_by).map(|u| u.summary()),
                    has_assessment: assessments.is_some(),
                    stats: CourseStats {
                        total_assigned,
                        completed,
                        completion_rate: percentage(completed, total_assigned),
                        assessments_passed,
                        average_rating: average_rating(ratings.iter().copied()),
                        total_ratings: ratings.len(),
                    },
                }
            })
            .collect()
    }

    pub fn employee_progress(&self) -> Vec<EmployeeProgress> {
        let index = ReportIndex::new(self);

        self.users
            .iter()
            .filter(|u| u.is_employee())
            .map(|employee| {
                let courses: Vec<AssignmentProgress> = index
                    .assignments_by_employee
                    .get(&employee.id)
                    .map(|list| list.iter().map(|a| index.progress_of(a)).collect())
                    .unwrap_or_default();
                let completed = courses.iter().filter(|c| c.is_completed).count();

                EmployeeProgress {
                    employee: EmployeeProfile::from(employee),
                    courses_assigned: courses.len(),
                    courses_completed: completed,
                    courses,
                }
            })
            .collect()
    }
}

/// Lookup tables over one snapshot, built once per report.
struct ReportIndex<'a> {
    users: HashMap<Uuid, &'a User>,
    courses: HashMap<Uuid, &'a Course>,
    /// Course id to its first assessment, the one progress is reported against.
    primary_assessment: HashMap<Uuid, &'a Assessment>,
    assessments_by_course: HashMap<Uuid, Vec<&'a Assessment>>,
    assignments_by_course: HashMap<Uuid, Vec<&'a Assignment>>,
    assignments_by_employee: HashMap<Uuid, Vec<&'a Assignment>>,
    /// Keyed by (assessment id, employee id)
    attempts: HashMap<(Uuid, Uuid), &'a Attempt>,
    passed_by_assessment: HashMap<Uuid, usize>,
    /// Keyed by (course id, employee id)
    ratings: HashMap<(Uuid, Uuid), &'a CourseRating>,
    ratings_by_course: HashMap<Uuid, Vec<&'a CourseRating>>,
}

impl<'a> ReportIndex<'a> {
    fn new(snapshot: &'a ReportSnapshot) -> Self {
        let mut index = Self {
            users: snapshot.users.iter().map(|u| (u.id, u)).collect(),
            courses: snapshot.courses.iter().map(|c| (c.id, c)).collect(),
            primary_assessment: HashMap::new(),
            assessments_by_course: HashMap::new(),
            assignments_by_course: HashMap::new(),
            assignments_by_employee: HashMap::new(),
            attempts: HashMap::new(),
            passed_by_assessment: HashMap::new(),
            ratings: HashMap::new(),
            ratings_by_course: HashMap::new(),
        };

        for assessment in &snapshot.assessments {
            index
                .assessments_by_course
                .entry(assessment.course_id)
                .or_default()
                .push(assessment);
            index
                .primary_assessment
                .entry(assessment.course_id)
                .and_modify(|current| {
                    if assessment.created_at < current.created_at {
                        *current = assessment;
                    }
                })
                .or_insert(assessment);
        }
        for assignment in &snapshot.assignments {
            index
                .assignments_by_course
                .entry(assignment.course_id)
                .or_default()
                .push(assignment);
            index
                .assignments_by_employee
                .entry(assignment.employee_id)
                .or_default()
                .push(assignment);
        }
        for attempt in &snapshot.attempts {
            index
                .attempts
                .entry((attempt.assessment_id, attempt.employee_id))
                .or_insert(attempt);
            if attempt.is_passed {
                *index
                    .passed_by_assessment
                    .entry(attempt.assessment_id)
                    .or_default() += 1;
            }
        }
        for rating in &snapshot.ratings {
            index
                .ratings
                .entry((rating.course_id, rating.employee_id))
                .or_insert(rating);
            index
                .ratings_by_course
                .entry(rating.course_id)
                .or_default()
                .push(rating);
        }

        index
    }

    fn attempt_for(&self, course_id: Uuid, employee_id: Uuid) -> Option<&'a Attempt> {
        let assessment = self.primary_assessment.get(&course_id)?;
        self.attempts.get(&(assessment.id, employee_id)).copied()
    }

    fn progress_of(&self, assignment: &Assignment) -> AssignmentProgress {
        let key = (assignment.course_id, assignment.employee_id);
        AssignmentProgress::build(
            assignment,
            self.users.get(&assignment.employee_id).map(|u| u.summary()),
            self.courses.get(&assignment.course_id).map(|c| (*c).clone()),
            self.attempt_for(assignment.course_id, assignment.employee_id),
            self.ratings.get(&key).copied(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserCounts {
    pub total: usize,
    pub admins: usize,
    pub managers: usize,
    pub employees: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequestCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseCounts {
    pub total: usize,
    pub requests: RequestCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCounts {
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

impl AssignmentCounts {
    pub fn new(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            completion_rate: percentage(completed, total),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCounts {
    pub total: usize,
    pub attempts: usize,
    pub passed: usize,
    pub pass_rate: f64,
}

impl AssessmentCounts {
    pub fn new(total: usize, attempts: usize, passed: usize) -> Self {
        Self {
            total,
            attempts,
            passed,
            pass_rate: percentage(passed, attempts),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingCounts {
    pub total: usize,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub users: UserCounts,
    pub courses: CourseCounts,
    pub assignments: AssignmentCounts,
    pub assessments: AssessmentCounts,
    pub ratings: RatingCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssessmentDraft, Grade, QuestionDraft, UserRole};

    fn user(role: UserRole, name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            employee_code: format!("E-{}", name),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            designation: "Engineer".to_string(),
            username: name.to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(author: Uuid) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Security Basics".to_string(),
            description: "d".to_string(),
            concept: "c".to_string(),
            duration: "1h".to_string(),
            video_link: None,
            pdf_link: None,
            created_by: author,
            request_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assessment(course_id: Uuid) -> Assessment {
        Assessment::from_draft(
            course_id,
            AssessmentDraft {
                total_marks: 10.0,
                passing_marks: 5.0,
                number_of_questions: 1,
                questions: vec![QuestionDraft {
                    question_text: "Q".to_string(),
                    options: vec!["yes".to_string(), "no".to_string()],
                    correct_answer: 0,
                }],
            },
        )
    }

    fn snapshot() -> (ReportSnapshot, Uuid, Uuid, Uuid) {
        let admin = user(UserRole::Admin, "admin");
        let manager = user(UserRole::Manager, "manager");
        let alice = user(UserRole::Employee, "alice");
        let bob = user(UserRole::Employee, "bob");
        let c = course(admin.id);
        let quiz = assessment(c.id);

        let mut done = Assignment::new(c.id, alice.id, manager.id);
        done.complete();
        let started = Assignment::new(c.id, bob.id, manager.id);

        let passed = Attempt::record(
            &quiz,
            alice.id,
            Grade {
                score: 10.0,
                correct: 1,
                is_passed: true,
                answers: vec![],
            },
        );

        let snapshot = ReportSnapshot {
            users: vec![admin.clone(), manager, alice.clone(), bob],
            courses: vec![c.clone()],
            assignments: vec![done, started],
            assessments: vec![quiz],
            attempts: vec![passed],
            ratings: vec![
                CourseRating::new(c.id, alice.id, 5, Some("Great".into())),
                CourseRating::new(c.id, Uuid::new_v4(), 3, None),
            ],
        };
        (snapshot, c.id, alice.id, admin.id)
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_course_report_stats() {
        let (snapshot, course_id, _, admin_id) = snapshot();
        let reports = snapshot.course_reports();

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.course.id, course_id);
        assert_eq!(report.author.as_ref().map(|a| a.id), Some(admin_id));
        assert!(report.has_assessment);
        assert_eq!(
            report.stats,
            CourseStats {
                total_assigned: 2,
                completed: 1,
                completion_rate: 50.0,
                assessments_passed: 1,
                average_rating: 4.0,
                total_ratings: 2,
            }
        );
    }

    #[test]
    fn test_progress_joins_attempt_and_rating() {
        let (snapshot, course_id, alice_id, _) = snapshot();
        let progress = snapshot.all_progress();

        let alice = progress
            .iter()
            .find(|p| p.employee.as_ref().map(|e| e.id) == Some(alice_id))
            .unwrap();
        assert!(alice.is_completed);
        assert_eq!(alice.course.as_ref().map(|c| c.id), Some(course_id));
        assert_eq!(alice.assessment.as_ref().map(|a| a.score), Some(10.0));
        assert_eq!(alice.rating.as_ref().map(|r| r.rating), Some(5));

        let bob = progress
            .iter()
            .find(|p| p.employee.as_ref().map(|e| e.id) != Some(alice_id))
            .unwrap();
        assert!(bob.assessment.is_none());
        assert!(bob.rating.is_none());
    }

    #[test]
    fn test_employee_progress_only_lists_employees() {
        let (snapshot, _, alice_id, _) = snapshot();
        let rows = snapshot.employee_progress();

        assert_eq!(rows.len(), 2);
        let alice = rows.iter().find(|r| r.employee.id == alice_id).unwrap();
        assert_eq!(alice.courses_assigned, 1);
        assert_eq!(alice.courses_completed, 1);
    }

    #[test]
    fn test_progress_reports_against_earliest_assessment() {
        let (mut snapshot, course_id, alice_id, _) = snapshot();
        let mut later = assessment(course_id);
        later.created_at = snapshot.assessments[0].created_at + chrono::Duration::hours(1);
        let bob_id = snapshot.assignments[1].employee_id;
        snapshot.attempts.push(Attempt::record(
            &later,
            bob_id,
            Grade {
                score: 10.0,
                correct: 1,
                is_passed: true,
                answers: vec![],
            },
        ));
        // Listed first so lookup order cannot pick it by accident
        snapshot.assessments.insert(0, later);

        let progress = snapshot.all_progress();
        let score_of = |id: Uuid| {
            progress
                .iter()
                .find(|p| p.employee.as_ref().map(|e| e.id) == Some(id))
                .and_then(|p| p.assessment.as_ref().map(|a| a.score))
        };
        assert_eq!(score_of(alice_id), Some(10.0));
        assert_eq!(score_of(bob_id), None);

        let report = &snapshot.course_reports()[0];
        assert_eq!(report.stats.assessments_passed, 2);
    }

    #[test]
    fn test_unassigned_course_reports_zeroes() {
        let (mut snapshot, _, _, admin_id) = snapshot();
        let idle = course(admin_id);
        snapshot.courses.push(idle.clone());

        let reports = snapshot.course_reports();
        let report = reports.iter().find(|r| r.course.id == idle.id).unwrap();
        assert!(!report.has_assessment);
        assert_eq!(report.stats, CourseStats::default());
    }

    #[test]
    fn test_counts_compute_rates() {
        assert_eq!(AssignmentCounts::new(4, 1).completion_rate, 25.0);
        assert_eq!(AssessmentCounts::new(2, 0, 0).pass_rate, 0.0);
        assert_eq!(AssessmentCounts::new(2, 4, 3).pass_rate, 75.0);
    }
}
