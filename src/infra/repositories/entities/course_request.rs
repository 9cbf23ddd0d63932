//! Course request database entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::CourseRequest;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub concept: String,
    pub duration: String,
    pub status: String,
    pub manager_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CourseRequest {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(CourseRequest {
            id: model.id,
            title: model.title,
            description: model.description,
            concept: model.concept,
            duration: model.duration,
            status: model.status.parse()?,
            manager_id: model.manager_id,
            created_at: model.created_at,
        })
    }
}

impl From<CourseRequest> for ActiveModel {
    fn from(request: CourseRequest) -> Self {
        ActiveModel {
            id: Set(request.id),
            title: Set(request.title),
            description: Set(request.description),
            concept: Set(request.concept),
            duration: Set(request.duration),
            status: Set(request.status.as_str().to_string()),
            manager_id: Set(request.manager_id),
            created_at: Set(request.created_at),
        }
    }
}
