//! Assessments, attempts and scoring.
//!
//! Every question carries the same weight, `total_marks / number_of_questions`.
//! An attempt scores `correct * total_marks / number_of_questions` and passes
//! when the score reaches `passing_marks`. Answers naming unknown questions
//! are stored with the attempt but never score.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::MIN_QUESTION_OPTIONS;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub number_of_questions: i32,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

/// Admin input for creating or replacing an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    #[schema(example = 100.0)]
    pub total_marks: f64,
    #[schema(example = 50.0)]
    pub passing_marks: f64,
    #[schema(example = 4)]
    pub number_of_questions: i32,
    pub questions: Vec<QuestionDraft>,
}

impl AssessmentDraft {
    pub fn validate(&self) -> AppResult<()> {
        if self.number_of_questions < 1 {
            return Err(AppError::validation(
                "Number of questions must be at least 1",
            ));
        }
        if self.questions.is_empty() {
            return Err(AppError::validation("At least one question is required"));
        }
        if self.questions.len() != self.number_of_questions as usize {
            return Err(AppError::validation(format!(
                "Number of questions is {} but {} questions were provided",
                self.number_of_questions,
                self.questions.len()
            )));
        }
        if !self.total_marks.is_finite() || self.total_marks <= 0.0 {
            return Err(AppError::validation("Total marks must be greater than 0"));
        }
        if !self.passing_marks.is_finite()
            || self.passing_marks < 0.0
            || self.passing_marks > self.total_marks
        {
            return Err(AppError::validation(
                "Passing marks must be between 0 and total marks",
            ));
        }

        for (index, question) in self.questions.iter().enumerate() {
            let n = index + 1;
            if question.question_text.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Question {} must have text",
                    n
                )));
            }
            if question.options.len() < MIN_QUESTION_OPTIONS {
                return Err(AppError::validation(format!(
                    "Question {} must have at least {} options",
                    n, MIN_QUESTION_OPTIONS
                )));
            }
            if question.correct_answer >= question.options.len() {
                return Err(AppError::validation(format!(
                    "Question {} has a correct answer outside its options",
                    n
                )));
            }
        }

        Ok(())
    }

    fn into_questions(self) -> Vec<Question> {
        self.questions
            .into_iter()
            .map(|q| Question {
                id: Uuid::new_v4(),
                question_text: q.question_text,
                options: q.options,
                correct_answer: q.correct_answer,
            })
            .collect()
    }
}

/// A submitted choice. Clients send either the option index or its
/// string form; anything that is not a non-negative integer never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SelectedOption {
    Index(i64),
    Text(String),
}

impl SelectedOption {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            SelectedOption::Index(i) => usize::try_from(*i).ok(),
            SelectedOption::Text(s) => s.trim().parse::<usize>().ok(),
        }
    }
}

impl std::fmt::Display for SelectedOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectedOption::Index(i) => write!(f, "{}", i),
            SelectedOption::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptAnswer {
    pub question_id: Uuid,
    pub selected_option: String,
}

/// Outcome of scoring one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub score: f64,
    pub correct: usize,
    pub is_passed: bool,
    pub answers: Vec<AttemptAnswer>,
}

impl Assessment {
    pub fn from_draft(course_id: Uuid, draft: AssessmentDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            course_id,
            total_marks: draft.total_marks,
            passing_marks: draft.passing_marks,
            number_of_questions: draft.number_of_questions,
            questions: draft.into_questions(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace marks and questions. Questions get fresh ids.
    pub fn replace(&mut self, draft: AssessmentDraft) {
        self.total_marks = draft.total_marks;
        self.passing_marks = draft.passing_marks;
        self.number_of_questions = draft.number_of_questions;
        self.questions = draft.into_questions();
        self.updated_at = Utc::now();
    }

    pub fn marks_per_question(&self) -> f64 {
        if self.number_of_questions <= 0 {
            return 0.0;
        }
        self.total_marks / f64::from(self.number_of_questions)
    }

    pub fn grade(&self, answers: &HashMap<Uuid, SelectedOption>) -> Grade {
        let mut correct = 0;
        let mut recorded = Vec::with_capacity(answers.len());

        for (question_id, selected) in answers {
            let matched = self
                .questions
                .iter()
                .find(|q| q.id == *question_id)
                .is_some_and(|q| selected.as_index() == Some(q.correct_answer));
            if matched {
                correct += 1;
            }
            recorded.push(AttemptAnswer {
                question_id: *question_id,
                selected_option: selected.to_string(),
            });
        }
        recorded.sort_by_key(|a| a.question_id);

        let score = correct as f64 * self.marks_per_question();
        Grade {
            score,
            correct,
            is_passed: score >= self.passing_marks,
            answers: recorded,
        }
    }
}

/// Question as shown to employees, without the answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAssessment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub number_of_questions: i32,
    pub questions: Vec<PublicQuestion>,
}

impl From<&Assessment> for PublicAssessment {
    fn from(assessment: &Assessment) -> Self {
        Self {
            id: assessment.id,
            course_id: assessment.course_id,
            total_marks: assessment.total_marks,
            passing_marks: assessment.passing_marks,
            number_of_questions: assessment.number_of_questions,
            questions: assessment
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    id: q.id,
                    question_text: q.question_text.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }
}

/// Assessment view chosen by the caller's role.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AssessmentView {
    Full(Assessment),
    Public(PublicAssessment),
}

/// Stored, scored submission. At most one per employee and assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub employee_id: Uuid,
    pub answers: Vec<AttemptAnswer>,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub score: f64,
    pub is_passed: bool,
    pub is_assessment_completed: bool,
    pub submission_date: DateTime<Utc>,
}

impl Attempt {
    pub fn record(assessment: &Assessment, employee_id: Uuid, grade: Grade) -> Self {
        Self {
            id: Uuid::new_v4(),
            assessment_id: assessment.id,
            employee_id,
            answers: grade.answers,
            total_marks: assessment.total_marks,
            passing_marks: assessment.passing_marks,
            score: grade.score,
            is_passed: grade.is_passed,
            is_assessment_completed: true,
            submission_date: Utc::now(),
        }
    }
}

/// What the employee sees after submitting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub attempt_id: Uuid,
    pub score: f64,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub is_passed: bool,
}

impl From<&Attempt> for AttemptResult {
    fn from(attempt: &Attempt) -> Self {
        Self {
            attempt_id: attempt.id,
            score: attempt.score,
            total_marks: attempt.total_marks,
            passing_marks: attempt.passing_marks,
            is_passed: attempt.is_passed,
        }
    }
}
