//! Course request aggregate and its approval state machine.
//!
//! A request starts `Pending` and is decided once by an Admin. Both
//! `Approved` and `Rejected` are terminal; only a rejected request may be
//! deleted, and only an approved one can back a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserSummary;
use crate::config::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => STATUS_PENDING,
            RequestStatus::Approved => STATUS_APPROVED,
            RequestStatus::Rejected => STATUS_REJECTED,
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = AppError;

    /// Unknown values are corrupt rows, not pending requests.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(RequestStatus::Pending),
            STATUS_APPROVED => Ok(RequestStatus::Approved),
            STATUS_REJECTED => Ok(RequestStatus::Rejected),
            other => Err(AppError::internal(format!(
                "Unknown course request status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub concept: String,
    pub duration: String,
    pub status: RequestStatus,
    pub manager_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Manager-supplied proposal fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourseRequest {
    pub title: String,
    pub description: String,
    pub concept: String,
    pub duration: String,
}

impl CourseRequest {
    /// Status the request moves to under `decision`.
    pub fn decide(&self, decision: Decision) -> AppResult<RequestStatus> {
        if self.status != RequestStatus::Pending {
            return Err(AppError::bad_request(format!(
                "Course request has already been {}",
                self.status.as_str().to_lowercase()
            )));
        }
        Ok(decision.target())
    }

    pub fn ensure_deletable(&self) -> AppResult<()> {
        if self.status != RequestStatus::Rejected {
            return Err(AppError::bad_request(
                "Only rejected course requests can be deleted",
            ));
        }
        Ok(())
    }

    pub fn ensure_approved(&self) -> AppResult<()> {
        if self.status != RequestStatus::Approved {
            return Err(AppError::bad_request(
                "Course can only be created from an approved request",
            ));
        }
        Ok(())
    }
}

/// Request as shown to Admins and Managers, annotated with course state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestOverview {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub concept: String,
    pub duration: String,
    pub status: RequestStatus,
    pub manager_id: Uuid,
    /// Requesting manager, when the account still exists
    pub manager: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub course_created: bool,
    pub course_id: Option<Uuid>,
}

impl RequestOverview {
    pub fn new(
        request: CourseRequest,
        manager: Option<UserSummary>,
        course_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: request.id,
            title: request.title,
            description: request.description,
            concept: request.concept,
            duration: request.duration,
            status: request.status,
            manager_id: request.manager_id,
            manager,
            created_at: request.created_at,
            course_created: course_id.is_some(),
            course_id,
        }
    }
}
