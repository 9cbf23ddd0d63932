//! Course database entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::Course;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub concept: String,
    pub duration: String,
    pub video_link: Option<String>,
    pub pdf_link: Option<String>,
    pub created_by: Uuid,
    pub request_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            title: model.title,
            description: model.description,
            concept: model.concept,
            duration: model.duration,
            video_link: model.video_link,
            pdf_link: model.pdf_link,
            created_by: model.created_by,
            request_id: model.request_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Course> for ActiveModel {
    fn from(course: Course) -> Self {
        ActiveModel {
            id: Set(course.id),
            title: Set(course.title),
            description: Set(course.description),
            concept: Set(course.concept),
            duration: Set(course.duration),
            video_link: Set(course.video_link),
            pdf_link: Set(course.pdf_link),
            created_by: Set(course.created_by),
            request_id: Set(course.request_id),
            created_at: Set(course.created_at),
            updated_at: Set(course.updated_at),
        }
    }
}
