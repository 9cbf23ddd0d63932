//! Course assignment repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::entities::assigned_course::{self, ActiveModel, Entity as AssignmentEntity};
use crate::domain::Assignment;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment>;

    async fn find(&self, course_id: Uuid, employee_id: Uuid) -> AppResult<Option<Assignment>>;

    async fn list(&self) -> AppResult<Vec<Assignment>>;

    async fn list_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Assignment>>;

    async fn list_by_course(&self, course_id: Uuid) -> AppResult<Vec<Assignment>>;

    /// Persist progress and completion of an existing assignment.
    async fn save(&self, assignment: Assignment) -> AppResult<Assignment>;

    /// Count assignments, optionally only completed or only open ones.
    async fn count(&self, completed: Option<bool>) -> AppResult<u64>;
}

pub struct AssignmentStore {
    db: DatabaseConnection,
}

impl AssignmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssignmentRepository for AssignmentStore {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        let model = ActiveModel::from(assignment).insert(&self.db).await?;
        Ok(Assignment::from(model))
    }

    async fn find(&self, course_id: Uuid, employee_id: Uuid) -> AppResult<Option<Assignment>> {
        let result = AssignmentEntity::find()
            .filter(assigned_course::Column::CourseId.eq(course_id))
            .filter(assigned_course::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await?;
        Ok(result.map(Assignment::from))
    }

    async fn list(&self) -> AppResult<Vec<Assignment>> {
        let models = AssignmentEntity::find()
            .order_by_desc(assigned_course::Column::AssignedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assignment::from).collect())
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> AppResult<Vec<Assignment>> {
        let models = AssignmentEntity::find()
            .filter(assigned_course::Column::EmployeeId.eq(employee_id))
            .order_by_desc(assigned_course::Column::AssignedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assignment::from).collect())
    }

    async fn list_by_course(&self, course_id: Uuid) -> AppResult<Vec<Assignment>> {
        let models = AssignmentEntity::find()
            .filter(assigned_course::Column::CourseId.eq(course_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Assignment::from).collect())
    }

    async fn save(&self, assignment: Assignment) -> AppResult<Assignment> {
        let model = ActiveModel::from(assignment).update(&self.db).await?;
        Ok(Assignment::from(model))
    }

    async fn count(&self, completed: Option<bool>) -> AppResult<u64> {
        let mut query = AssignmentEntity::find();
        if let Some(completed) = completed {
            query = query.filter(assigned_course::Column::IsCompleted.eq(completed));
        }
        Ok(query.count(&self.db).await?)
    }
}
