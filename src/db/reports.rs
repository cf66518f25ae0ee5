use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use super::gen_id;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Report {
    pub id: String,
    pub project_id: String,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    pool: &SqlitePool,
    project_id: &str,
    file_path: Option<&str>,
) -> Result<Report, sqlx::Error> {
    let report = Report {
        id: gen_id(),
        project_id: project_id.to_string(),
        file_path: file_path.map(str::to_string),
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO reports (id, project_id, file_path, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&report.id)
    .bind(&report.project_id)
    .bind(&report.file_path)
    .bind(report.created_at)
    .execute(pool)
    .await?;

    Ok(report)
}

pub async fn list(pool: &SqlitePool, project_id: &str) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        "SELECT id, project_id, file_path, created_at FROM reports
         WHERE project_id = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}
