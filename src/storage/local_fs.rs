use super::*;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Stores assets under `<root>/<project-id>/{uploads,edited}/`.
pub struct LocalFileStorage {
    storage_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(storage_path: PathBuf) -> Result<Self, ApiError> {
        if !storage_path.exists() {
            std::fs::create_dir_all(&storage_path)?;
        }
        let storage_path = storage_path.canonicalize()?;
        Ok(Self { storage_path })
    }

    pub fn root(&self) -> &Path {
        &self.storage_path
    }

    async fn subdir(&self, project_id: &str, name: &str) -> Result<PathBuf, ApiError> {
        let dir = self.project_dir(project_id).await?.join(name);
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }
}

fn require_filename(filename: &str) -> Result<String, ApiError> {
    sanitize_filename(filename)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid filename: {filename:?}")))
}

#[async_trait]
impl Storage for LocalFileStorage {
    async fn project_dir(&self, project_id: &str) -> Result<PathBuf, ApiError> {
        // Identifiers are otherwise unchecked, but must name a single directory.
        if sanitize_filename(project_id).as_deref() != Some(project_id) {
            return Err(ApiError::BadRequest(format!(
                "Invalid project id: {project_id:?}"
            )));
        }

        let dir = self.storage_path.join(project_id);
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    async fn save_upload(
        &self,
        project_id: &str,
        filename: &str,
        body: &mut dyn ChunkSource,
    ) -> Result<String, ApiError> {
        let filename = require_filename(filename)?;
        let file_path = self.subdir(project_id, UPLOADS_DIR).await?.join(&filename);

        let mut file = fs::File::create(&file_path).await?;
        let mut size = 0u64;
        while let Some(chunk) = body.next_chunk().await? {
            file.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        file.flush().await?;
        tracing::debug!(project_id, path = %file_path.display(), size, "stored upload");

        Ok(format!("{UPLOADS_DIR}/{filename}"))
    }

    async fn open_upload(
        &self,
        project_id: &str,
        filename: &str,
    ) -> Result<StoredAsset, ApiError> {
        let not_found = || ApiError::NotFound("File not found.".to_string());

        let filename = sanitize_filename(filename).ok_or_else(not_found)?;
        let file_path = self
            .project_dir(project_id)
            .await?
            .join(UPLOADS_DIR)
            .join(&filename);

        match fs::metadata(&file_path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %file_path.display(), "file not found");
                return Err(not_found());
            }
            Err(e) => return Err(e.into()),
        };

        let content_type = mime_guess::from_path(&filename).first_or_octet_stream();
        let file = fs::File::open(&file_path).await?;
        // Length as of opening; a concurrent overwrite may still change it.
        let len = file.metadata().await?.len();
        tracing::debug!(path = %file_path.display(), %content_type, len, "serving file");

        Ok(StoredAsset {
            file,
            len,
            content_type,
        })
    }

    async fn save_edited(
        &self,
        project_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<PathBuf, ApiError> {
        let filename = require_filename(filename)?;
        let file_path = self.subdir(project_id, EDITED_DIR).await?.join(filename);

        fs::write(&file_path, &bytes).await?;
        tracing::debug!(project_id, path = %file_path.display(), size = bytes.len(), "stored edited asset");

        Ok(file_path)
    }
}
