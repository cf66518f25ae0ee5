mod data_url;
mod local_fs;
mod sanitize;

pub use data_url::{DataUrlError, decode_data_url};
pub use local_fs::LocalFileStorage;
pub use sanitize::sanitize_filename;

use crate::errors::ApiError;
use async_trait::async_trait;
use axum::body::Bytes;
use mime::Mime;
use std::path::PathBuf;

#[cfg(test)]
use std::collections::VecDeque;

pub const UPLOADS_DIR: &str = "uploads";
pub const EDITED_DIR: &str = "edited";

/// An uploaded asset opened for streaming back to the client.
#[derive(Debug)]
pub struct StoredAsset {
    pub file: tokio::fs::File,
    pub len: u64,
    pub content_type: Mime,
}

/// Incremental source of upload bytes, drained one chunk at a time so an
/// upload never has to fit in memory.
#[async_trait]
pub trait ChunkSource: Send {
    /// Next chunk, or `None` once the source is exhausted.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, ApiError>;
}

#[cfg(test)]
#[async_trait]
impl ChunkSource for VecDeque<Bytes> {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, ApiError> {
        Ok(self.pop_front())
    }
}

/// Project-scoped asset storage.
///
/// Every filename handed to these methods is untrusted and is reduced to its
/// final path component before it touches the filesystem. Writes overwrite
/// an existing asset of the same name.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Absolute path of the project's directory, created if absent.
    async fn project_dir(&self, project_id: &str) -> Result<PathBuf, ApiError>;

    /// Streams `body` into `uploads/<name>` and returns that relative reference.
    async fn save_upload(
        &self,
        project_id: &str,
        filename: &str,
        body: &mut dyn ChunkSource,
    ) -> Result<String, ApiError>;

    async fn open_upload(&self, project_id: &str, filename: &str)
    -> Result<StoredAsset, ApiError>;

    /// Writes `bytes` to `edited/<name>` and returns the absolute path written.
    async fn save_edited(
        &self,
        project_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<PathBuf, ApiError>;
}
