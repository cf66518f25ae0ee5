use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use super::gen_id;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub async fn create(pool: &SqlitePool, name: &str) -> Result<Project, sqlx::Error> {
    let project = Project {
        id: gen_id(),
        name: name.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query("INSERT INTO projects (id, name, created_at) VALUES (?, ?, ?)")
        .bind(&project.id)
        .bind(&project.name)
        .bind(project.created_at)
        .execute(pool)
        .await?;

    Ok(project)
}

/// All projects, newest first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, name, created_at FROM projects ORDER BY created_at DESC, rowid DESC",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn create_then_list_newest_first() {
        let pool = test_pool().await;
        let kitchen = create(&pool, "Kitchen remodel").await.unwrap();
        let loft = create(&pool, "Loft").await.unwrap();

        let projects = list(&pool).await.unwrap();
        let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, [loft.id.as_str(), kitchen.id.as_str()]);
        assert_eq!(projects[1].name, "Kitchen remodel");
    }

    #[tokio::test]
    async fn empty_database_lists_nothing() {
        let pool = test_pool().await;
        assert!(list(&pool).await.unwrap().is_empty());
    }
}
