//! Local disk storage for uploaded course PDFs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use utoipa::ToSchema;

use crate::config::{PDF_MIME_TYPE, PDF_SUBDIR, UPLOADS_URL_PREFIX};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Characters allowed in a stored file name; everything else becomes `_`.
static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid filename pattern"));

/// Suffixed names tried after `<millis>-<name>` is already taken.
const MAX_NAME_COLLISIONS: usize = 100;

/// Metadata of a stored PDF.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    /// Public path served by the static file route.
    pub url: String,
}

/// Turn a client-supplied name into a flat, path-free file name.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Reject names that would escape the storage directory.
pub fn ensure_plain_filename(filename: &str) -> AppResult<()> {
    let invalid = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || filename.starts_with('.');
    if invalid {
        return Err(AppError::bad_request("Invalid file name"));
    }
    Ok(())
}

/// Candidate stored name; `attempt > 0` adds `-<attempt>` before the extension.
fn stored_name(millis: i64, sanitized: &str, attempt: usize) -> String {
    if attempt == 0 {
        return format!("{}-{}", millis, sanitized);
    }
    match sanitized.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}-{}.{}", millis, stem, attempt, ext),
        None => format!("{}-{}-{}", millis, sanitized, attempt),
    }
}

/// Open a new file under the first free candidate name. `create_new`
/// never replaces a file another upload already owns.
async fn create_unique(
    dir: &Path,
    millis: i64,
    sanitized: &str,
) -> AppResult<(String, tokio::fs::File)> {
    let mut attempt = 0;
    loop {
        let candidate = stored_name(millis, sanitized, attempt);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&candidate))
            .await
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e)
                if e.kind() == std::io::ErrorKind::AlreadyExists
                    && attempt < MAX_NAME_COLLISIONS =>
            {
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Public URL for a stored PDF.
pub fn pdf_url(filename: &str) -> String {
    format!("{}/{}/{}", UPLOADS_URL_PREFIX, PDF_SUBDIR, filename)
}

/// Stored name for a URL produced by [`pdf_url`], if it is one.
pub fn filename_from_url(url: &str) -> Option<&str> {
    let prefix = format!("{}/{}/", UPLOADS_URL_PREFIX, PDF_SUBDIR);
    url.strip_prefix(prefix.as_str())
        .filter(|name| ensure_plain_filename(name).is_ok())
}

/// Storage seam for uploaded PDFs.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write the bytes under a fresh `<millis>-<name>` file name.
    async fn save_pdf(&self, original_name: &str, bytes: Vec<u8>) -> AppResult<StoredFile>;

    async fn list_pdfs(&self) -> AppResult<Vec<StoredFile>>;

    /// Remove a stored PDF; `NotFound` when it does not exist.
    async fn delete_pdf(&self, filename: &str) -> AppResult<()>;
}

/// `FileStore` writing to `<root>/pdfs` with tokio's async fs.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served as `/uploads`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pdf_dir(&self) -> PathBuf {
        self.root.join(PDF_SUBDIR)
    }

    fn describe(filename: String, size: u64) -> StoredFile {
        let original_name = filename
            .split_once('-')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| filename.clone());
        StoredFile {
            url: pdf_url(&filename),
            filename,
            original_name,
            mime_type: PDF_MIME_TYPE.to_string(),
            size,
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save_pdf(&self, original_name: &str, bytes: Vec<u8>) -> AppResult<StoredFile> {
        let dir = self.pdf_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let millis = chrono::Utc::now().timestamp_millis();
        let sanitized = sanitize_filename(original_name);
        let size = bytes.len() as u64;

        let (filename, mut file) = create_unique(&dir, millis, &sanitized).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        tracing::info!(filename = %filename, size, "Stored uploaded PDF");

        let mut stored = Self::describe(filename, size);
        stored.original_name = original_name.to_string();
        Ok(stored)
    }

    async fn list_pdfs(&self) -> AppResult<Vec<StoredFile>> {
        let dir = self.pdf_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.to_ascii_lowercase().ends_with(".pdf") {
                continue;
            }
            let size = entry.metadata().await?.len();
            files.push(Self::describe(name, size));
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }

    async fn delete_pdf(&self, filename: &str) -> AppResult<()> {
        ensure_plain_filename(filename)?;

        match tokio::fs::remove_file(self.pdf_dir().join(filename)).await {
            Ok(()) => {
                tracing::info!(filename, "Deleted PDF");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::not_found("File")),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("learning-portal-{}-{}", tag, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Rust Basics.pdf"), "Rust_Basics.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\intro.pdf"), "intro.pdf");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
        assert_eq!(sanitize_filename(""), "document.pdf");
    }

    #[test]
    fn test_plain_filename_guard() {
        assert!(ensure_plain_filename("1700000000000-intro.pdf").is_ok());
        assert!(ensure_plain_filename("../secret.pdf").is_err());
        assert!(ensure_plain_filename("nested/file.pdf").is_err());
        assert!(ensure_plain_filename(".env").is_err());
        assert!(ensure_plain_filename("").is_err());
    }

    #[test]
    fn test_url_round_trip() {
        let url = pdf_url("1-intro.pdf");
        assert_eq!(url, "/uploads/pdfs/1-intro.pdf");
        assert_eq!(filename_from_url(&url), Some("1-intro.pdf"));
        assert_eq!(filename_from_url("https://cdn.example.com/intro.pdf"), None);
        assert_eq!(filename_from_url("/uploads/pdfs/../x.pdf"), None);
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let root = temp_root("store");
        let store = LocalFileStore::new(&root);

        let stored = store.save_pdf("Safety Manual.pdf", b"%PDF-1.4".to_vec()).await.unwrap();
        assert!(stored.filename.ends_with("-Safety_Manual.pdf"));
        assert_eq!(stored.original_name, "Safety Manual.pdf");
        assert_eq!(stored.size, 8);
        assert_eq!(stored.url, format!("/uploads/pdfs/{}", stored.filename));

        let listed = store.list_pdfs().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].filename, stored.filename);

        store.delete_pdf(&stored.filename).await.unwrap();
        assert!(matches!(
            store.delete_pdf(&stored.filename).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.list_pdfs().await.unwrap().is_empty());

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[test]
    fn test_stored_name_suffix_keeps_extension() {
        assert_eq!(stored_name(7, "intro.pdf", 0), "7-intro.pdf");
        assert_eq!(stored_name(7, "intro.pdf", 2), "7-intro-2.pdf");
        assert_eq!(stored_name(7, "intro", 1), "7-intro-1");
    }

    #[tokio::test]
    async fn test_same_millisecond_uploads_get_distinct_files() {
        let root = temp_root("collide");
        tokio::fs::create_dir_all(&root).await.unwrap();

        let (first, mut file) = create_unique(&root, 42, "guide.pdf").await.unwrap();
        file.write_all(b"first").await.unwrap();
        file.flush().await.unwrap();
        let (second, _) = create_unique(&root, 42, "guide.pdf").await.unwrap();

        assert_eq!(first, "42-guide.pdf");
        assert_eq!(second, "42-guide-1.pdf");
        let kept = tokio::fs::read(root.join(&first)).await.unwrap();
        assert_eq!(kept, b"first");

        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_list_without_directory_is_empty() {
        let store = LocalFileStore::new(temp_root("missing"));
        assert!(store.list_pdfs().await.unwrap().is_empty());
    }
}
