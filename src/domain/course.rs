//! Course entity. One course is built from one approved request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserSummary;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub concept: String,
    pub duration: String,
    pub video_link: Option<String>,
    pub pdf_link: Option<String>,
    pub created_by: Uuid,
    pub request_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable course material.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseContent {
    pub title: String,
    pub description: String,
    pub concept: String,
    pub duration: String,
    pub video_link: Option<String>,
    pub pdf_link: Option<String>,
}

/// Refuse a second course for the same request.
pub fn ensure_no_existing_course(existing: Option<&Course>) -> AppResult<()> {
    match existing {
        Some(course) => Err(AppError::conflict(format!(
            "Course already created for this request (courseId: {}, title: {})",
            course.id, course.title
        ))),
        None => Ok(()),
    }
}

impl Course {
    /// New course authored by `created_by` for an approved request.
    pub fn from_content(content: CourseContent, created_by: Uuid, request_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: content.title,
            description: content.description,
            concept: content.concept,
            duration: content.duration,
            video_link: content.video_link.filter(|v| !v.trim().is_empty()),
            pdf_link: content.pdf_link.filter(|p| !p.trim().is_empty()),
            created_by,
            request_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit. Links are only replaced when a new value is supplied.
    ///
    /// Returns the previous PDF link when it was replaced by a different one.
    pub fn apply(&mut self, content: CourseContent) -> Option<String> {
        self.title = content.title;
        self.description = content.description;
        self.concept = content.concept;
        self.duration = content.duration;

        if let Some(video) = content.video_link.filter(|v| !v.trim().is_empty()) {
            self.video_link = Some(video);
        }

        let mut replaced = None;
        if let Some(pdf) = content.pdf_link.filter(|p| !p.trim().is_empty()) {
            if self.pdf_link.as_deref() != Some(pdf.as_str()) {
                replaced = self.pdf_link.replace(pdf);
            }
        }

        self.updated_at = Utc::now();
        replaced
    }
}

/// Course listed together with its author.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithAuthor {
    #[serde(flatten)]
    pub course: Course,
    pub author: Option<UserSummary>,
}
