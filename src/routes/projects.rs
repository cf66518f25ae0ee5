use axum::{Extension, Json, extract::rejection::JsonRejection, http::StatusCode};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::db::projects::{self, Project};
use crate::errors::ApiError;

pub async fn list(Extension(db): Extension<SqlitePool>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(projects::list(&db).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    name: Option<String>,
}

pub async fn create(
    Extension(db): Extension<SqlitePool>,
    body: Result<Json<CreateProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let name = body
        .ok()
        .and_then(|Json(request)| request.name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Project name is required".to_string()))?;

    let project = projects::create(&db, &name).await?;
    tracing::info!(project_id = %project.id, name = %project.name, "project created");

    Ok((StatusCode::CREATED, Json(project)))
}
