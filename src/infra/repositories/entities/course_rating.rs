//! Course rating database entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::CourseRating;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub employee_id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub review: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CourseRating {
    fn from(model: Model) -> Self {
        CourseRating {
            id: model.id,
            course_id: model.course_id,
            employee_id: model.employee_id,
            rating: model.rating,
            review: model.review,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CourseRating> for ActiveModel {
    fn from(rating: CourseRating) -> Self {
        ActiveModel {
            id: Set(rating.id),
            course_id: Set(rating.course_id),
            employee_id: Set(rating.employee_id),
            rating: Set(rating.rating),
            review: Set(rating.review),
            created_at: Set(rating.created_at),
            updated_at: Set(rating.updated_at),
        }
    }
}
