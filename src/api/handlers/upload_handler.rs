//! Course PDF uploads.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};

use crate::api::extractors::ValidPath;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::config::PDF_FIELD_NAME;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};
use crate::infra::StoredFile;
use crate::types::ApiResponse;

/// Headroom for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/pdf",
            post(upload_pdf).layer(DefaultBodyLimit::max(
                max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route("/pdfs", get(list_pdfs))
        .route("/pdf/:filename", delete(delete_pdf))
}

/// Upload a course PDF
///
/// Multipart form with the file in the `pdf` field.
#[utoipa::path(
    post,
    path = "/api/upload/pdf",
    tag = "Uploads",
    request_body(content = String, content_type = "multipart/form-data", description = "PDF in the `pdf` field"),
    responses(
        (status = 200, description = "File stored", body = StoredFile),
        (status = 400, description = "Missing file, not a PDF or too large"),
        (status = 403, description = "Only admins and managers can upload files")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<StoredFile>>> {
    require_role(
        &user,
        &[UserRole::Admin, UserRole::Manager],
        "Only admins and managers can upload files",
    )?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some(PDF_FIELD_NAME) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let stored = state
            .services
            .uploads()
            .upload_pdf(&original_name, content_type, bytes.to_vec())
            .await?;
        return Ok(Json(ApiResponse::with_message(
            stored,
            "File uploaded successfully",
        )));
    }

    Err(AppError::bad_request("No file uploaded or file is not a PDF"))
}

/// Stored PDFs
#[utoipa::path(
    get,
    path = "/api/upload/pdfs",
    tag = "Uploads",
    responses(
        (status = 200, description = "Stored PDFs", body = [StoredFile]),
        (status = 403, description = "Only admins and managers can view files")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_pdfs(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<StoredFile>>> {
    require_role(
        &user,
        &[UserRole::Admin, UserRole::Manager],
        "Only admins and managers can view files",
    )?;
    Ok(Json(state.services.uploads().list_pdfs().await?))
}

/// Delete a stored PDF
#[utoipa::path(
    delete,
    path = "/api/upload/pdf/{filename}",
    tag = "Uploads",
    params(("filename" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File deleted"),
        (status = 400, description = "Invalid file name"),
        (status = 403, description = "Only admins can delete files"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidPath(filename): ValidPath<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_role(&user, &[UserRole::Admin], "Only admins can delete files")?;
    state.services.uploads().delete_pdf(&filename).await?;
    Ok(Json(ApiResponse::message("File deleted successfully")))
}
