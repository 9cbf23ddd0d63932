//! Course ratings. One per employee and course; re-rating updates in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserSummary;
use crate::config::{MAX_RATING, MIN_RATING};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRating {
    pub id: Uuid,
    pub course_id: Uuid,
    pub employee_id: Uuid,
    pub rating: i32,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn validate_rating(rating: i32) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::validation(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

impl CourseRating {
    pub fn new(course_id: Uuid, employee_id: Uuid, rating: i32, review: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            course_id,
            employee_id,
            rating,
            review: review.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the score; an absent or blank review keeps the old text.
    pub fn revise(&mut self, rating: i32, review: Option<String>) {
        self.rating = rating;
        if let Some(review) = review.filter(|r| !r.trim().is_empty()) {
            self.review = review;
        }
        self.updated_at = Utc::now();
    }
}

/// Whether a rating call inserted or updated.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingUpsert {
    Created(CourseRating),
    Updated(CourseRating),
}

impl RatingUpsert {
    pub fn rating(&self) -> &CourseRating {
        match self {
            RatingUpsert::Created(r) | RatingUpsert::Updated(r) => r,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, RatingUpsert::Created(_))
    }
}

/// Mean of the given scores, 0 when empty.
pub fn average_rating<'a>(ratings: impl IntoIterator<Item = &'a CourseRating>) -> f64 {
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0usize), |(sum, count), r| (sum + i64::from(r.rating), count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub id: Uuid,
    pub rating: i32,
    pub review: String,
    pub employee: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
}

/// All ratings of a course with their mean.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRatingSummary {
    pub course_id: Uuid,
    pub average_rating: f64,
    pub total_ratings: usize,
    pub ratings: Vec<RatingEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(matches!(validate_rating(0), Err(AppError::Validation(_))));
        assert!(matches!(validate_rating(6), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_new_rating_defaults_review() {
        let r = CourseRating::new(Uuid::new_v4(), Uuid::new_v4(), 4, None);
        assert_eq!(r.review, "");
    }

    #[test]
    fn test_revise_keeps_review_when_absent() {
        let mut r = CourseRating::new(Uuid::new_v4(), Uuid::new_v4(), 4, Some("Good".into()));
        r.revise(2, None);
        assert_eq!(r.rating, 2);
        assert_eq!(r.review, "Good");

        r.revise(5, Some("Great after the update".into()));
        assert_eq!(r.review, "Great after the update");
    }

    #[test]
    fn test_average() {
        let course = Uuid::new_v4();
        let ratings: Vec<_> = [5, 4, 3]
            .into_iter()
            .map(|n| CourseRating::new(course, Uuid::new_v4(), n, None))
            .collect();
        assert_eq!(average_rating(&ratings), 4.0);
        assert_eq!(average_rating(&Vec::new()), 0.0);
    }
}
