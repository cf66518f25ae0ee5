use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

use super::gen_id;

/// Annotation layer saved by the editor for one file of a project.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Annotation {
    pub id: String,
    pub project_id: String,
    pub file_name: Option<String>,
    #[sqlx(json)]
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    pool: &SqlitePool,
    project_id: &str,
    file_name: Option<&str>,
    data: Value,
) -> Result<Annotation, sqlx::Error> {
    let annotation = Annotation {
        id: gen_id(),
        project_id: project_id.to_string(),
        file_name: file_name.map(str::to_string),
        data,
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO annotations (id, project_id, file_name, data, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&annotation.id)
    .bind(&annotation.project_id)
    .bind(&annotation.file_name)
    .bind(sqlx::types::Json(&annotation.data))
    .bind(annotation.created_at)
    .execute(pool)
    .await?;

    Ok(annotation)
}

/// Annotations of one project in the order they were saved.
pub async fn list(pool: &SqlitePool, project_id: &str) -> Result<Vec<Annotation>, sqlx::Error> {
    sqlx::query_as::<_, Annotation>(
        "SELECT id, project_id, file_name, data, created_at FROM annotations
         WHERE project_id = ? ORDER BY created_at, rowid",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn json_data_round_trips_per_project() {
        let pool = test_pool().await;
        let shapes = json!({ "shapes": [{ "kind": "rect", "x": 10, "y": 20 }] });
        create(&pool, "p1", Some("plan.pdf"), shapes.clone())
            .await
            .unwrap();
        create(&pool, "p2", None, json!({})).await.unwrap();

        let saved = list(&pool, "p1").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].file_name.as_deref(), Some("plan.pdf"));
        assert_eq!(saved[0].data, shapes);
    }
}
