//! Course rating repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::course_rating::{self, ActiveModel, Entity as RatingEntity};
use crate::domain::CourseRating;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn create(&self, rating: CourseRating) -> AppResult<CourseRating>;

    async fn find(&self, course_id: Uuid, employee_id: Uuid) -> AppResult<Option<CourseRating>>;

    async fn save(&self, rating: CourseRating) -> AppResult<CourseRating>;

    async fn list(&self) -> AppResult<Vec<CourseRating>>;

    /// Ratings of one course, newest first.
    async fn list_by_course(&self, course_id: Uuid) -> AppResult<Vec<CourseRating>>;

    async fn list_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<CourseRating>>;
}

pub struct RatingStore {
    db: DatabaseConnection,
}

impl RatingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingStore {
    async fn create(&self, rating: CourseRating) -> AppResult<CourseRating> {
        let model = ActiveModel::from(rating).insert(&self.db).await?;
        Ok(CourseRating::from(model))
    }

    async fn find(&self, course_id: Uuid, employee_id: Uuid) -> AppResult<Option<CourseRating>> {
        let result = RatingEntity::find()
            .filter(course_rating::Column::CourseId.eq(course_id))
            .filter(course_rating::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await?;
        Ok(result.map(CourseRating::from))
    }

    async fn save(&self, rating: CourseRating) -> AppResult<CourseRating> {
        let model = ActiveModel::from(rating).update(&self.db).await?;
        Ok(CourseRating::from(model))
    }

    async fn list(&self) -> AppResult<Vec<CourseRating>> {
        let models = RatingEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(CourseRating::from).collect())
    }

    async fn list_by_course(&self, course_id: Uuid) -> AppResult<Vec<CourseRating>> {
        let models = RatingEntity::find()
            .filter(course_rating::Column::CourseId.eq(course_id))
            .order_by_desc(course_rating::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(CourseRating::from).collect())
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<CourseRating>> {
        let models = RatingEntity::find()
            .filter(course_rating::Column::EmployeeId.eq(employee_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(CourseRating::from).collect())
    }
}
