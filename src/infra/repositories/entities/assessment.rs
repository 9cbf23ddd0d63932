//! Assessment database entity. Questions live in a JSONB column.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use crate::domain::{Assessment, Question};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct QuestionList(pub Vec<Question>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub number_of_questions: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub questions: QuestionList,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Assessment {
    fn from(model: Model) -> Self {
        Assessment {
            id: model.id,
            course_id: model.course_id,
            total_marks: model.total_marks,
            passing_marks: model.passing_marks,
            number_of_questions: model.number_of_questions,
            questions: model.questions.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Assessment> for ActiveModel {
    fn from(assessment: Assessment) -> Self {
        ActiveModel {
            id: Set(assessment.id),
            course_id: Set(assessment.course_id),
            total_marks: Set(assessment.total_marks),
            passing_marks: Set(assessment.passing_marks),
            number_of_questions: Set(assessment.number_of_questions),
            questions: Set(QuestionList(assessment.questions)),
            created_at: Set(assessment.created_at),
            updated_at: Set(assessment.updated_at),
        }
    }
}
