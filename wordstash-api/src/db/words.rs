//! Word record persistence
//!
//! Every operation here is a single self-contained statement; nothing holds a
//! transaction across the dictionary lookup. The enrichment update is a point
//! UPDATE whose affected-row count doubles as the "record still exists" check,
//! so a concurrent delete degrades to a no-op instead of an error.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// A registered word, optionally enriched with dictionary data
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub id: i64,
    pub text: String,
    pub pronunciation: Option<String>,
    pub definition: Option<String>,
    pub page_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn from_row(row: &SqliteRow) -> WordRecord {
    WordRecord {
        id: row.get("id"),
        text: row.get("text"),
        pronunciation: row.get("pronunciation"),
        definition: row.get("definition"),
        page_url: row.get("page_url"),
        created_at: row.get("created_at"),
    }
}

const SELECT_COLUMNS: &str = "id, text, pronunciation, definition, page_url, created_at";

/// Insert a new word and return the stored record with its assigned id
///
/// Enrichment fields start out NULL; the background task fills them in later.
pub async fn insert_word(
    pool: &SqlitePool,
    text: &str,
    page_url: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<WordRecord, sqlx::Error> {
    let row = sqlx::query(&format!(
        "INSERT INTO words (text, page_url, created_at) VALUES (?, ?, ?) RETURNING {}",
        SELECT_COLUMNS
    ))
    .bind(text)
    .bind(page_url)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(from_row(&row))
}

/// List words newest-first with a pagination window
///
/// Ties in `created_at` break on `id DESC` so repeated calls never reorder.
pub async fn list_words(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<WordRecord>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM words ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        SELECT_COLUMNS
    ))
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Count all words regardless of any pagination window
pub async fn count_words(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM words")
        .fetch_one(pool)
        .await
}

/// Load a single word by id
pub async fn get_word(pool: &SqlitePool, id: i64) -> Result<Option<WordRecord>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM words WHERE id = ?",
        SELECT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Delete one word; returns false if no such id exists
pub async fn delete_word(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM words WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every word; an already-empty table is not an error
pub async fn delete_all_words(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM words").execute(pool).await?;
    Ok(())
}

/// Apply dictionary enrichment to a word, returning false if the record is gone
///
/// Only non-empty incoming values land; NULLIF/COALESCE keeps an existing
/// pronunciation or definition when the lookup produced nothing for that
/// field. Re-applying the same result is idempotent.
pub async fn apply_enrichment(
    pool: &SqlitePool,
    id: i64,
    pronunciation: Option<&str>,
    definition: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE words SET
            pronunciation = COALESCE(NULLIF(?, ''), pronunciation),
            definition = COALESCE(NULLIF(?, ''), definition)
        WHERE id = ?
        "#,
    )
    .bind(pronunciation)
    .bind(definition)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
