//! Assessment attempt repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use super::entities::assessment_attempt::{self, ActiveModel, Entity as AttemptEntity};
use crate::domain::Attempt;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;

    async fn find(&self, assessment_id: Uuid, employee_id: Uuid) -> AppResult<Option<Attempt>>;

    async fn list(&self) -> AppResult<Vec<Attempt>>;

    async fn list_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Attempt>>;

    /// Count attempts, optionally only passed or only failed ones.
    async fn count(&self, passed: Option<bool>) -> AppResult<u64>;
}

pub struct AttemptStore {
    db: DatabaseConnection,
}

impl AttemptStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttemptRepository for AttemptStore {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        let model = ActiveModel::from(attempt).insert(&self.db).await?;
        Ok(Attempt::from(model))
    }

    async fn find(&self, assessment_id: Uuid, employee_id: Uuid) -> AppResult<Option<Attempt>> {
        let result = AttemptEntity::find()
            .filter(assessment_attempt::Column::AssessmentId.eq(assessment_id))
            .filter(assessment_attempt::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await?;
        Ok(result.map(Attempt::from))
    }

    async fn list(&self) -> AppResult<Vec<Attempt>> {
        let models = AttemptEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Attempt::from).collect())
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Attempt>> {
        let models = AttemptEntity::find()
            .filter(assessment_attempt::Column::EmployeeId.eq(employee_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Attempt::from).collect())
    }

    async fn count(&self, passed: Option<bool>) -> AppResult<u64> {
        let mut query = AttemptEntity::find();
        if let Some(passed) = passed {
            query = query.filter(assessment_attempt::Column::IsPassed.eq(passed));
        }
        Ok(query.count(&self.db).await?)
    }
}
