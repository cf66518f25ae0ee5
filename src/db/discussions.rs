use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

/// A discussion thread; its content lives in free-form `metadata`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Discussion {
    pub id: i64,
    pub project_id: String,
    #[sqlx(json)]
    pub metadata: Value,
}

pub async fn create(
    pool: &SqlitePool,
    project_id: &str,
    metadata: Value,
) -> Result<Discussion, sqlx::Error> {
    let id = sqlx::query("INSERT INTO discussions (project_id, metadata) VALUES (?, ?)")
        .bind(project_id)
        .bind(sqlx::types::Json(&metadata))
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(Discussion {
        id,
        project_id: project_id.to_string(),
        metadata,
    })
}

pub async fn list(pool: &SqlitePool, project_id: &str) -> Result<Vec<Discussion>, sqlx::Error> {
    sqlx::query_as::<_, Discussion>(
        "SELECT id, project_id, metadata FROM discussions WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}
