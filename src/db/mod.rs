//! Relational records for projects and the annotations, reports and
//! discussions attached to them.
//!
//! Records reference stored assets only by file name or path. Nothing ties a
//! row to the file on disk, so either can exist without the other.

pub mod annotations;
pub mod discussions;
pub mod projects;
pub mod reports;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

/// Opens the database at `url`, creating the file if needed, and applies
/// the embedded migrations.
pub async fn init_pool(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    // An in-memory database lives and dies with its single connection.
    let in_memory = url.contains(":memory:");
    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .idle_timeout(if in_memory { None } else { Some(std::time::Duration::from_secs(600)) })
        .max_lifetime(if in_memory { None } else { Some(std::time::Duration::from_secs(1800)) })
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(url, "database ready");

    Ok(pool)
}

/// Short random identifier: the first 12 hex digits of a v4 UUID.
pub fn gen_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    init_pool("sqlite::memory:").await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_id_is_twelve_hex_chars() {
        let id = gen_id();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, gen_id());
    }

    #[tokio::test]
    async fn migrations_are_rerunnable() {
        let pool = test_pool().await;
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    }
}
