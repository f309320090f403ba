//! Database access layer for wordstash-api
//!
//! Single `words` table. Schema bootstrap is idempotent and evolution is
//! strictly additive: new optional columns are added with ALTER TABLE, never
//! by rebuilding the table.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::info;

pub mod words;

/// Initialize database connection pool and bootstrap the schema
///
/// Accepts any SQLite connection string (e.g. `sqlite://wordstash.db?mode=rwc`).
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    // In-memory databases exist per-connection, so the pool must not grow
    // beyond one connection for them.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    // WAL allows concurrent readers while the enrichment task writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    info!("Database ready: {}", database_url);
    Ok(pool)
}

/// Create tables if needed and apply additive column migrations
///
/// Safe to call on every startup.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            page_url TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Enrichment columns arrived after the initial deployment; older database
    // files may lack them.
    ensure_column(pool, "words", "pronunciation", "TEXT").await?;
    ensure_column(pool, "words", "definition", "TEXT").await?;

    Ok(())
}

/// Add a column to an existing table if it is missing
async fn ensure_column(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    declared_type: &str,
) -> Result<()> {
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await?;

    let exists = rows
        .iter()
        .any(|row| row.get::<String, _>("name") == column);

    if !exists {
        sqlx::query(&format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            table, column, declared_type
        ))
        .execute(pool)
        .await?;
        info!("Added column {}.{} ({})", table, column, declared_type);
    }

    Ok(())
}
