//! Application state - Dependency injection container.
//!
//! Handlers reach every use case through the `ServiceContainer` trait.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services, TokenCodec};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    /// Verifies bearer tokens in the auth middleware
    pub tokens: TokenCodec,
    /// Request body limit for multipart PDF uploads
    pub max_upload_bytes: usize,
    /// Directory served under `/uploads`
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Build state with the production service container.
    pub fn from_config(database: &Database, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(Arc::new(services), config)
    }

    /// Build state around any container, e.g. fakes in tests.
    pub fn new(services: Arc<dyn ServiceContainer>, config: &Config) -> Self {
        Self {
            services,
            tokens: TokenCodec::new(config),
            max_upload_bytes: config.max_upload_bytes,
            upload_dir: config.upload_dir.clone(),
        }
    }
}
