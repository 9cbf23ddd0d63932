//! Course assignment database entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::Assignment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assigned_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub employee_id: Uuid,
    pub assigned_by: Uuid,
    pub assigned_at: DateTimeUtc,
    pub progress: i32,
    pub is_completed: bool,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Assignment {
    fn from(model: Model) -> Self {
        Assignment {
            id: model.id,
            course_id: model.course_id,
            employee_id: model.employee_id,
            assigned_by: model.assigned_by,
            assigned_at: model.assigned_at,
            progress: model.progress,
            is_completed: model.is_completed,
            completed_at: model.completed_at,
        }
    }
}

impl From<Assignment> for ActiveModel {
    fn from(assignment: Assignment) -> Self {
        ActiveModel {
            id: Set(assignment.id),
            course_id: Set(assignment.course_id),
            employee_id: Set(assignment.employee_id),
            assigned_by: Set(assignment.assigned_by),
            assigned_at: Set(assignment.assigned_at),
            progress: Set(assignment.progress),
            is_completed: Set(assignment.is_completed),
            completed_at: Set(assignment.completed_at),
        }
    }
}
