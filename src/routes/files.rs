use async_trait::async_trait;
use axum::{
    Extension, Json,
    body::{Body, Bytes},
    extract::{
        Multipart, Path,
        multipart::{Field, MultipartRejection},
        rejection::JsonRejection,
    },
    response::{IntoResponse, Response},
};
use headers::{AccessControlAllowOrigin, CacheControl, ContentType, HeaderMapExt, Pragma};
use http::{HeaderValue, header};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::errors::ApiError;
use crate::storage::{ChunkSource, Storage, decode_data_url};

#[async_trait]
impl ChunkSource for Field<'_> {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, ApiError> {
        self.chunk()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

pub async fn upload(
    Path(pid): Path<String>,
    Extension(storage): Extension<Arc<dyn Storage>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let no_file = || ApiError::BadRequest("No file part".to_string());
    let mut multipart = multipart.map_err(|_| no_file())?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("No selected file".to_string()));
        }

        let path = storage.save_upload(&pid, &filename, &mut field).await?;
        tracing::info!(project_id = %pid, %path, "file uploaded");
        return Ok(Json(json!({ "success": true, "path": path })));
    }

    Err(no_file())
}

pub async fn serve_file(
    Path((pid, filename)): Path<(String, String)>,
    Extension(storage): Extension<Arc<dyn Storage>>,
) -> Result<Response, ApiError> {
    let asset = storage.open_upload(&pid, &filename).await?;

    // No Content-Length: a concurrent overwrite can change the size mid-stream.
    let mut response = Body::from_stream(ReaderStream::new(asset.file)).into_response();
    let headers = response.headers_mut();
    headers.typed_insert(ContentType::from(asset.content_type));
    headers.typed_insert(
        CacheControl::new()
            .with_no_cache()
            .with_no_store()
            .with_must_revalidate(),
    );
    headers.typed_insert(Pragma::no_cache());
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.typed_insert(AccessControlAllowOrigin::ANY);

    Ok(response)
}

#[derive(Debug, Deserialize)]
pub struct SavePdfRequest {
    #[serde(rename = "pdfData")]
    pdf_data: Option<String>,
    filename: Option<String>,
}

/// Stores an edited asset sent as a base64 data URL under `edited/`.
pub async fn save_pdf(
    Path(pid): Path<String>,
    Extension(storage): Extension<Arc<dyn Storage>>,
    body: Result<Json<SavePdfRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let missing = || ApiError::BadRequest("Missing PDF data or filename".to_string());
    let Json(request) = body.map_err(|_| missing())?;

    let (Some(pdf_data), Some(filename)) = (request.pdf_data, request.filename) else {
        return Err(missing());
    };
    if pdf_data.is_empty() || filename.is_empty() {
        return Err(missing());
    }

    let bytes = decode_data_url(&pdf_data).map_err(|e| ApiError::Internal(e.to_string()))?;
    let path = storage.save_edited(&pid, &filename, bytes).await?;
    tracing::info!(project_id = %pid, path = %path.display(), "edited file saved");

    Ok(Json(json!({ "success": true, "path": path.display().to_string() })))
}
