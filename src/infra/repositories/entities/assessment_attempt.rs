//! Assessment attempt database entity.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use crate::domain::{Attempt, AttemptAnswer};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AnswerList(pub Vec<AttemptAnswer>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_attempts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub employee_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub answers: AnswerList,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub score: f64,
    pub is_passed: bool,
    pub is_assessment_completed: bool,
    pub submission_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Attempt {
    fn from(model: Model) -> Self {
        Attempt {
            id: model.id,
            assessment_id: model.assessment_id,
            employee_id: model.employee_id,
            answers: model.answers.0,
            total_marks: model.total_marks,
            passing_marks: model.passing_marks,
            score: model.score,
            is_passed: model.is_passed,
            is_assessment_completed: model.is_assessment_completed,
            submission_date: model.submission_date,
        }
    }
}

impl From<Attempt> for ActiveModel {
    fn from(attempt: Attempt) -> Self {
        ActiveModel {
            id: Set(attempt.id),
            assessment_id: Set(attempt.assessment_id),
            employee_id: Set(attempt.employee_id),
            answers: Set(AnswerList(attempt.answers)),
            total_marks: Set(attempt.total_marks),
            passing_marks: Set(attempt.passing_marks),
            score: Set(attempt.score),
            is_passed: Set(attempt.is_passed),
            is_assessment_completed: Set(attempt.is_assessment_completed),
            submission_date: Set(attempt.submission_date),
        }
    }
}
