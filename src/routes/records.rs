use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::db::annotations::{self, Annotation};
use crate::db::discussions::{self, Discussion};
use crate::db::reports::{self, Report};
use crate::errors::ApiError;

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnotation {
    file_name: Option<String>,
    #[serde(default)]
    data: Value,
}

pub async fn list_annotations(
    Path(pid): Path<String>,
    Extension(db): Extension<SqlitePool>,
) -> Result<Json<Vec<Annotation>>, ApiError> {
    Ok(Json(annotations::list(&db, &pid).await?))
}

pub async fn create_annotation(
    Path(pid): Path<String>,
    Extension(db): Extension<SqlitePool>,
    body: Result<Json<CreateAnnotation>, JsonRejection>,
) -> Result<(StatusCode, Json<Annotation>), ApiError> {
    let request = json_body(body)?;
    let annotation =
        annotations::create(&db, &pid, request.file_name.as_deref(), request.data).await?;
    Ok((StatusCode::CREATED, Json(annotation)))
}

#[derive(Debug, Deserialize)]
pub struct CreateReport {
    file_path: Option<String>,
}

pub async fn list_reports(
    Path(pid): Path<String>,
    Extension(db): Extension<SqlitePool>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(reports::list(&db, &pid).await?))
}

pub async fn create_report(
    Path(pid): Path<String>,
    Extension(db): Extension<SqlitePool>,
    body: Result<Json<CreateReport>, JsonRejection>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let request = json_body(body)?;
    let report = reports::create(&db, &pid, request.file_path.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[derive(Debug, Deserialize)]
pub struct CreateDiscussion {
    #[serde(default)]
    metadata: Value,
}

pub async fn list_discussions(
    Path(pid): Path<String>,
    Extension(db): Extension<SqlitePool>,
) -> Result<Json<Vec<Discussion>>, ApiError> {
    Ok(Json(discussions::list(&db, &pid).await?))
}

pub async fn create_discussion(
    Path(pid): Path<String>,
    Extension(db): Extension<SqlitePool>,
    body: Result<Json<CreateDiscussion>, JsonRejection>,
) -> Result<(StatusCode, Json<Discussion>), ApiError> {
    let request = json_body(body)?;
    let discussion = discussions::create(&db, &pid, request.metadata).await?;
    Ok((StatusCode::CREATED, Json(discussion)))
}
