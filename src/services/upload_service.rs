//! PDF uploads for course material.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PDF_MIME_TYPE;
use crate::errors::{AppError, AppResult};
use crate::infra::storage::ensure_plain_filename;
use crate::infra::{FileStore, StoredFile};

#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload_pdf(
        &self,
        original_name: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile>;

    async fn list_pdfs(&self) -> AppResult<Vec<StoredFile>>;

    async fn delete_pdf(&self, filename: &str) -> AppResult<()>;
}

pub struct PdfLibrary {
    files: Arc<dyn FileStore>,
    max_bytes: usize,
}

impl PdfLibrary {
    pub fn new(files: Arc<dyn FileStore>, max_bytes: usize) -> Self {
        Self { files, max_bytes }
    }
}

#[async_trait]
impl UploadService for PdfLibrary {
    async fn upload_pdf(
        &self,
        original_name: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile> {
        if content_type.as_deref() != Some(PDF_MIME_TYPE) {
            return Err(AppError::bad_request("Only PDF files are allowed"));
        }
        if bytes.is_empty() {
            return Err(AppError::bad_request("No file uploaded or file is not a PDF"));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::bad_request(format!(
                "File exceeds the {} byte upload limit",
                self.max_bytes
            )));
        }

        let stored = self.files.save_pdf(original_name, bytes).await?;
        tracing::info!(filename = %stored.filename, size = stored.size, "PDF uploaded");
        Ok(stored)
    }

    async fn list_pdfs(&self) -> AppResult<Vec<StoredFile>> {
        self.files.list_pdfs().await
    }

    async fn delete_pdf(&self, filename: &str) -> AppResult<()> {
        ensure_plain_filename(filename)?;
        self.files.delete_pdf(filename).await?;
        tracing::info!(filename, "PDF deleted");
        Ok(())
    }
}
