//! Course assignment and progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{MAX_PROGRESS, MIN_PROGRESS};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub employee_id: Uuid,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
    /// Percentage in `0..=100`
    pub progress: i32,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

pub fn validate_progress(progress: i32) -> AppResult<()> {
    if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
        return Err(AppError::validation(format!(
            "Progress must be between {} and {}",
            MIN_PROGRESS, MAX_PROGRESS
        )));
    }
    Ok(())
}

impl Assignment {
    pub fn new(course_id: Uuid, employee_id: Uuid, assigned_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id,
            employee_id,
            assigned_by,
            assigned_at: Utc::now(),
            progress: MIN_PROGRESS,
            is_completed: false,
            completed_at: None,
        }
    }

    /// Record employee progress. Reaching 100 completes the course once.
    pub fn record_progress(&mut self, progress: i32) -> AppResult<()> {
        validate_progress(progress)?;
        self.progress = progress;
        if progress == MAX_PROGRESS && !self.is_completed {
            self.is_completed = true;
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }

    /// Explicit completion; always stamps a fresh completion time.
    pub fn complete(&mut self) {
        self.progress = MAX_PROGRESS;
        self.is_completed = true;
        self.completed_at = Some(Utc::now());
    }
}

/// Why one employee in a bulk assignment was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentIssue {
    pub employee_id: Uuid,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<Uuid>,
}

impl AssignmentIssue {
    pub fn not_an_employee(employee_id: Uuid) -> Self {
        Self {
            employee_id,
            message: "Invalid employee ID or user is not an employee".to_string(),
            assigned_on: None,
            assigned_by: None,
        }
    }

    pub fn already_assigned(existing: &Assignment) -> Self {
        Self {
            employee_id: existing.employee_id,
            message: "Course is already assigned to this employee".to_string(),
            assigned_on: Some(existing.assigned_at),
            assigned_by: Some(existing.assigned_by),
        }
    }
}

/// Result of a bulk assignment: what was created and what was skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
    pub assignments: Vec<Assignment>,
    pub errors: Vec<AssignmentIssue>,
}

impl AssignmentOutcome {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> Assignment {
        Assignment::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_new_assignment_starts_at_zero() {
        let a = assignment();
        assert_eq!(a.progress, 0);
        assert!(!a.is_completed);
        assert!(a.completed_at.is_none());
    }

    #[test]
    fn test_progress_out_of_range_is_rejected() {
        let mut a = assignment();
        assert!(matches!(a.record_progress(101), Err(AppError::Validation(_))));
        assert!(matches!(a.record_progress(-1), Err(AppError::Validation(_))));
        assert_eq!(a.progress, 0);
    }

    #[test]
    fn test_partial_progress_does_not_complete() {
        let mut a = assignment();
        a.record_progress(40).unwrap();
        assert_eq!(a.progress, 40);
        assert!(!a.is_completed);
    }

    #[test]
    fn test_full_progress_completes_once() {
        let mut a = assignment();
        a.record_progress(100).unwrap();
        assert!(a.is_completed);
        let first = a.completed_at;
        assert!(first.is_some());

        a.record_progress(100).unwrap();
        assert_eq!(a.completed_at, first);
    }

    #[test]
    fn test_complete_sets_full_progress() {
        let mut a = assignment();
        a.record_progress(10).unwrap();
        a.complete();
        assert_eq!(a.progress, 100);
        assert!(a.is_completed);
        assert!(a.completed_at.is_some());
    }

    #[test]
    fn test_already_assigned_issue_carries_origin() {
        let existing = assignment();
        let issue = AssignmentIssue::already_assigned(&existing);
        assert_eq!(issue.employee_id, existing.employee_id);
        assert_eq!(issue.assigned_by, Some(existing.assigned_by));
        assert_eq!(issue.assigned_on, Some(existing.assigned_at));
    }
}
