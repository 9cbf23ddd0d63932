//! Assessment repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::entities::assessment::{self, ActiveModel, Entity as AssessmentEntity};
use crate::domain::Assessment;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn create(&self, assessment: Assessment) -> AppResult<Assessment>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Assessment>>;

    /// The course's first assessment.
    async fn find_by_course(&self, course_id: Uuid) -> AppResult<Option<Assessment>>;

    async fn list_by_course(&self, course_id: Uuid) -> AppResult<Vec<Assessment>>;

    async fn list_by_courses(&self, course_ids: Vec<Uuid>) -> AppResult<Vec<Assessment>>;

    async fn list(&self) -> AppResult<Vec<Assessment>>;

    async fn save(&self, assessment: Assessment) -> AppResult<Assessment>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct AssessmentStore {
    db: DatabaseConnection,
}

impl AssessmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssessmentRepository for AssessmentStore {
    async fn create(&self, assessment: Assessment) -> AppResult<Assessment> {
        let model = ActiveModel::from(assessment).insert(&self.db).await?;
        Ok(Assessment::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Assessment>> {
        let result = AssessmentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Assessment::from))
    }

    async fn find_by_course(&self, course_id: Uuid) -> AppResult<Option<Assessment>> {
        let result = AssessmentEntity::find()
            .filter(assessment::Column::CourseId.eq(course_id))
            .order_by_asc(assessment::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(result.map(Assessment::from))
    }

    async fn list_by_course(&self, course_id: Uuid) -> AppResult<Vec<Assessment>> {
        let models = AssessmentEntity::find()
            .filter(assessment::Column::CourseId.eq(course_id))
            .order_by_asc(assessment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assessment::from).collect())
    }

    async fn list_by_courses(&self, course_ids: Vec<Uuid>) -> AppResult<Vec<Assessment>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = AssessmentEntity::find()
            .filter(assessment::Column::CourseId.is_in(course_ids))
            .order_by_asc(assessment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assessment::from).collect())
    }

    async fn list(&self) -> AppResult<Vec<Assessment>> {
        let models = AssessmentEntity::find()
            .order_by_asc(assessment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assessment::from).collect())
    }

    async fn save(&self, assessment: Assessment) -> AppResult<Assessment> {
        let model = ActiveModel::from(assessment).update(&self.db).await?;
        Ok(Assessment::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(AssessmentEntity::find().count(&self.db).await?)
    }
}
