//! Assessment authoring and viewing handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidPath, ValidatedJson};
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{Assessment, AssessmentDraft, AssessmentView, QuestionDraft, UserRole};
use crate::errors::AppResult;
use crate::types::ApiResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBody {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub question_text: String,
    #[validate(length(min = 2, message = "Each question needs at least two options"))]
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub correct_answer: usize,
}

/// Assessment definition sent by an Admin
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentBody {
    #[schema(example = 100.0)]
    pub total_marks: f64,
    #[schema(example = 50.0)]
    pub passing_marks: f64,
    #[validate(range(min = 1, message = "At least one question is required"))]
    #[schema(example = 4)]
    pub number_of_questions: i32,
    #[validate(nested)]
    pub questions: Vec<QuestionBody>,
}

impl From<AssessmentBody> for AssessmentDraft {
    fn from(body: AssessmentBody) -> Self {
        Self {
            total_marks: body.total_marks,
            passing_marks: body.passing_marks,
            number_of_questions: body.number_of_questions,
            questions: body
                .questions
                .into_iter()
                .map(|q| QuestionDraft {
                    question_text: q.question_text,
                    options: q.options,
                    correct_answer: q.correct_answer,
                })
                .collect(),
        }
    }
}

pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/create/:course_id", post(create_assessment))
        .route("/edit/:course_id", put(edit_assessment))
        .route("/:course_id", get(get_assessment))
}

pub fn view_assessment_routes() -> Router<AppState> {
    Router::new().route("/course/:course_id", get(list_course_assessments))
}

/// Create an assessment for a course
#[utoipa::path(
    post,
    path = "/api/assessments/create/{course_id}",
    tag = "Assessments",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = AssessmentBody,
    responses(
        (status = 201, description = "Assessment created", body = Assessment),
        (status = 400, description = "Invalid assessment"),
        (status = 403, description = "Only admin can create assessments"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<AssessmentBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<Assessment>>)> {
    require_role(&user, &[UserRole::Admin], "Only admin can create assessments")?;

    let assessment = state
        .services
        .assessments()
        .create(course_id, body.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            assessment,
            "Assessment created successfully",
        )),
    ))
}

/// Replace a course's assessment
#[utoipa::path(
    put,
    path = "/api/assessments/edit/{course_id}",
    tag = "Assessments",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = AssessmentBody,
    responses(
        (status = 200, description = "Assessment updated", body = Assessment),
        (status = 400, description = "Invalid assessment"),
        (status = 403, description = "Only admin can edit assessments"),
        (status = 404, description = "Course or assessment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
    ValidatedJson(body): ValidatedJson<AssessmentBody>,
) -> AppResult<Json<ApiResponse<Assessment>>> {
    require_role(&user, &[UserRole::Admin], "Only admin can edit assessments")?;

    let assessment = state
        .services
        .assessments()
        .edit(course_id, body.into())
        .await?;

    Ok(Json(ApiResponse::with_message(
        assessment,
        "Assessment updated successfully",
    )))
}

/// A course's assessment; Employees get it without answers
#[utoipa::path(
    get,
    path = "/api/assessments/{course_id}",
    tag = "Assessments",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assessment", body = AssessmentView),
        (status = 404, description = "Assessment not found for this course")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
) -> AppResult<Json<AssessmentView>> {
    let view = state
        .services
        .assessments()
        .for_course(course_id, user.role)
        .await?;
    Ok(Json(view))
}

/// Every assessment of a course, answers included
#[utoipa::path(
    get,
    path = "/api/view-assessments/course/{course_id}",
    tag = "Assessments",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assessments", body = [Assessment]),
        (status = 403, description = "Only managers can view assessments"),
        (status = 404, description = "No assessments found for this course")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_course_assessments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(course_id): ValidPath<Uuid>,
) -> AppResult<Json<Vec<Assessment>>> {
    require_role(&user, &[UserRole::Manager], "Only managers can view assessments")?;
    Ok(Json(state.services.assessments().list_for_course(course_id).await?))
}
