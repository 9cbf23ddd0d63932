//! Course ratings: employee upserts and the per-course summary.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    average_rating, validate_rating, CourseRating, CourseRatingSummary, RatingEntry, RatingUpsert,
    User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RatingService: Send + Sync {
    /// Rate an assigned course. A second call by the same employee
    /// revises the existing rating.
    async fn rate(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
        rating: i32,
        review: Option<String>,
    ) -> AppResult<RatingUpsert>;

    async fn course_ratings(&self, course_id: Uuid) -> AppResult<CourseRatingSummary>;
}

pub struct RatingBook<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RatingBook<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RatingService for RatingBook<U> {
    async fn rate(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
        rating: i32,
        review: Option<String>,
    ) -> AppResult<RatingUpsert> {
        validate_rating(rating)?;

        if self
            .uow
            .assignments()
            .find(course_id, employee_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Course not assigned to you".to_string()));
        }

        let ratings = self.uow.ratings();
        match ratings.find(course_id, employee_id).await? {
            Some(mut existing) => {
                existing.revise(rating, review);
                let saved = ratings.save(existing).await?;
                tracing::info!(course_id = %course_id, employee_id = %employee_id, rating, "Course rating updated");
                Ok(RatingUpsert::Updated(saved))
            }
            None => {
                let created = ratings
                    .create(CourseRating::new(course_id, employee_id, rating, review))
                    .await?;
                tracing::info!(course_id = %course_id, employee_id = %employee_id, rating, "Course rated");
                Ok(RatingUpsert::Created(created))
            }
        }
    }

    async fn course_ratings(&self, course_id: Uuid) -> AppResult<CourseRatingSummary> {
        let ratings = self.uow.ratings().list_by_course(course_id).await?;

        let rater_ids: Vec<Uuid> = ratings.iter().map(|r| r.employee_id).collect();
        let raters: HashMap<Uuid, User> = self
            .uow
            .users()
            .find_by_ids(rater_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let average = average_rating(&ratings);
        let entries: Vec<RatingEntry> = ratings
            .into_iter()
            .map(|r| RatingEntry {
                id: r.id,
                rating: r.rating,
                employee: raters.get(&r.employee_id).map(User::summary),
                review: r.review,
                created_at: r.created_at,
            })
            .collect();

        Ok(CourseRatingSummary {
            course_id,
            average_rating: average,
            total_ratings: entries.len(),
            ratings: entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{Assignment, UserRole};
    use crate::infra::repositories::{
        MockAssignmentRepository, MockRatingRepository, MockUserRepository,
    };
    use crate::infra::unit_of_work::MockUnitOfWork;
    use crate::infra::{AssignmentRepository, RatingRepository, UserRepository};

    fn book(
        assignments: MockAssignmentRepository,
        ratings: MockRatingRepository,
        users: MockUserRepository,
    ) -> RatingBook<MockUnitOfWork> {
        let mut uow = MockUnitOfWork::new();
        uow.expect_assignments()
            .return_const(Arc::new(assignments) as Arc<dyn AssignmentRepository>);
        uow.expect_ratings()
            .return_const(Arc::new(ratings) as Arc<dyn RatingRepository>);
        uow.expect_users()
            .return_const(Arc::new(users) as Arc<dyn UserRepository>);
        RatingBook::new(Arc::new(uow))
    }

    fn assigned() -> MockAssignmentRepository {
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_find().returning(|course_id, employee_id| {
            Ok(Some(Assignment::new(course_id, employee_id, Uuid::new_v4())))
        });
        assignments
    }

    #[tokio::test]
    async fn test_first_rating_is_created() {
        let mut ratings = MockRatingRepository::new();
        ratings.expect_find().returning(|_, _| Ok(None));
        ratings.expect_create().times(1).returning(|r| Ok(r));
        ratings.expect_save().never();

        let upsert = book(assigned(), ratings, MockUserRepository::new())
            .rate(Uuid::new_v4(), Uuid::new_v4(), 4, None)
            .await
            .unwrap();

        assert!(upsert.is_created());
        assert_eq!(upsert.rating().rating, 4);
        assert_eq!(upsert.rating().review, "");
    }

    #[tokio::test]
    async fn test_second_rating_updates_in_place() {
        let employee_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let existing = CourseRating::new(course_id, employee_id, 2, Some("Too long".into()));
        let existing_id = existing.id;

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_find()
            .returning(move |_, _| Ok(Some(existing.clone())));
        ratings.expect_create().never();
        ratings.expect_save().times(1).returning(|r| Ok(r));

        let upsert = book(assigned(), ratings, MockUserRepository::new())
            .rate(employee_id, course_id, 5, None)
            .await
            .unwrap();

        assert!(!upsert.is_created());
        assert_eq!(upsert.rating().id, existing_id);
        assert_eq!(upsert.rating().rating, 5);
        assert_eq!(upsert.rating().review, "Too long");
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_find().never();

        let err = book(assignments, MockRatingRepository::new(), MockUserRepository::new())
            .rate(Uuid::new_v4(), Uuid::new_v4(), 6, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unassigned_course_cannot_be_rated() {
        let mut assignments = MockAssignmentRepository::new();
        assignments.expect_find().returning(|_, _| Ok(None));

        let err = book(assignments, MockRatingRepository::new(), MockUserRepository::new())
            .rate(Uuid::new_v4(), Uuid::new_v4(), 3, Some("ok".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Course not assigned to you"));
    }

    #[tokio::test]
    async fn test_course_summary_averages() {
        let course_id = Uuid::new_v4();
        let rater = Uuid::new_v4();
        let listed = vec![
            CourseRating::new(course_id, rater, 5, Some("Great".into())),
            CourseRating::new(course_id, Uuid::new_v4(), 2, None),
        ];

        let mut ratings = MockRatingRepository::new();
        ratings
            .expect_list_by_course()
            .returning(move |_| Ok(listed.clone()));
        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().returning(move |_| {
            Ok(vec![User {
                id: rater,
                employee_code: "E-9".to_string(),
                name: "Avery".to_string(),
                email: "avery@example.com".to_string(),
                designation: "Tester".to_string(),
                username: "avery".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Employee,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }])
        });

        let summary = book(MockAssignmentRepository::new(), ratings, users)
            .course_ratings(course_id)
            .await
            .unwrap();

        assert_eq!(summary.total_ratings, 2);
        assert_eq!(summary.average_rating, 3.5);
        assert_eq!(
            summary.ratings[0].employee.as_ref().map(|e| e.name.as_str()),
            Some("Avery")
        );
        assert!(summary.ratings[1].employee.is_none());
    }

    #[tokio::test]
    async fn test_unrated_course_averages_zero() {
        let mut ratings = MockRatingRepository::new();
        ratings.expect_list_by_course().returning(|_| Ok(Vec::new()));
        let mut users = MockUserRepository::new();
        users.expect_find_by_ids().returning(|_| Ok(Vec::new()));

        let summary = book(MockAssignmentRepository::new(), ratings, users)
            .course_ratings(Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(summary.average_rating, 0.0);
        assert!(summary.ratings.is_empty());
    }
}
