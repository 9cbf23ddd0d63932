//! Course repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::Course;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> AppResult<Course>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>>;

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Course>>;

    /// Course built from the given request, if any.
    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Course>>;

    async fn find_by_requests(&self, request_ids: Vec<Uuid>) -> AppResult<Vec<Course>>;

    async fn list(&self) -> AppResult<Vec<Course>>;

    /// Persist every field of an existing course.
    async fn update(&self, course: Course) -> AppResult<Course>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn create(&self, course: Course) -> AppResult<Course> {
        let model = ActiveModel::from(course).insert(&self.db).await?;
        Ok(Course::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Course::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = CourseEntity::find()
            .filter(course::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Option<Course>> {
        let result = CourseEntity::find()
            .filter(course::Column::RequestId.eq(request_id))
            .order_by_asc(course::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(result.map(Course::from))
    }

    async fn find_by_requests(&self, request_ids: Vec<Uuid>) -> AppResult<Vec<Course>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = CourseEntity::find()
            .filter(course::Column::RequestId.is_in(request_ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn list(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_desc(course::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn update(&self, course: Course) -> AppResult<Course> {
        let model = ActiveModel::from(course).update(&self.db).await?;
        Ok(Course::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(CourseEntity::find().count(&self.db).await?)
    }
}
