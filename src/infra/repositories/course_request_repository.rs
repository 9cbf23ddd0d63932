//! Course request repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::course_request::{self, ActiveModel, Entity as CourseRequestEntity};
use crate::domain::{CourseRequest, NewCourseRequest, RequestStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRequestRepository: Send + Sync {
    /// Insert a new `Pending` request for `manager_id`.
    async fn create(&self, manager_id: Uuid, request: NewCourseRequest) -> AppResult<CourseRequest>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CourseRequest>>;

    /// All requests, newest first.
    async fn list(&self) -> AppResult<Vec<CourseRequest>>;

    async fn list_by_manager(&self, manager_id: Uuid) -> AppResult<Vec<CourseRequest>>;

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> AppResult<CourseRequest>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self, status: Option<RequestStatus>) -> AppResult<u64>;
}

pub struct CourseRequestStore {
    db: DatabaseConnection,
}

impl CourseRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRequestRepository for CourseRequestStore {
    async fn create(&self, manager_id: Uuid, request: NewCourseRequest) -> AppResult<CourseRequest> {
        let record = CourseRequest {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            concept: request.concept,
            duration: request.duration,
            status: RequestStatus::Pending,
            manager_id,
            created_at: chrono::Utc::now(),
        };

        let model = ActiveModel::from(record).insert(&self.db).await?;
        CourseRequest::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CourseRequest>> {
        let result = CourseRequestEntity::find_by_id(id).one(&self.db).await?;
        result.map(CourseRequest::try_from).transpose()
    }

    async fn list(&self) -> AppResult<Vec<CourseRequest>> {
        let models = CourseRequestEntity::find()
            .order_by_desc(course_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(CourseRequest::try_from).collect()
    }

    async fn list_by_manager(&self, manager_id: Uuid) -> AppResult<Vec<CourseRequest>> {
        let models = CourseRequestEntity::find()
            .filter(course_request::Column::ManagerId.eq(manager_id))
            .order_by_desc(course_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        models.into_iter().map(CourseRequest::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> AppResult<CourseRequest> {
        let request = CourseRequestEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Course request"))?;

        let mut active: ActiveModel = request.into();
        active.status = Set(status.as_str().to_string());

        let model = active.update(&self.db).await?;
        CourseRequest::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CourseRequestEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Course request"));
        }
        Ok(())
    }

    async fn count(&self, status: Option<RequestStatus>) -> AppResult<u64> {
        let mut query = CourseRequestEntity::find();
        if let Some(status) = status {
            query = query.filter(course_request::Column::Status.eq(status.as_str()));
        }
        Ok(query.count(&self.db).await?)
    }
}
