//! Word registration and listing handlers
//!
//! POST acknowledges the write synchronously and fires the enrichment task
//! without awaiting it; the response never waits on the dictionary.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::db::words::WordRecord;
use crate::error::{ApiError, ApiResult};
use crate::services::enrichment;
use crate::{db, AppState};

/// POST /api/words request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordRequest {
    pub text: String,
    pub page_url: Option<String>,
    pub created_at: Option<String>,
}

/// Query parameters for word listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/words response
#[derive(Debug, Serialize)]
pub struct WordListResponse {
    pub words: Vec<WordRecord>,
    pub total: i64,
}

/// GET /api/words?skip=&limit=
///
/// Newest-first listing; `total` counts the whole table regardless of the
/// pagination window.
pub async fn list_words(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<WordListResponse>> {
    if query.skip < 0 || query.limit < 0 {
        return Err(ApiError::BadRequest(
            "skip and limit must be non-negative".to_string(),
        ));
    }

    let words = db::words::list_words(&state.db, query.skip, query.limit).await?;
    let total = db::words::count_words(&state.db).await?;

    Ok(Json(WordListResponse { words, total }))
}

/// POST /api/words
///
/// Registers a word and returns it with its assigned id. As a side effect
/// the enrichment task is spawned after the insert commits; the response
/// carries unset pronunciation/definition regardless of how that task fares.
pub async fn create_word(
    State(state): State<AppState>,
    Json(request): Json<CreateWordRequest>,
) -> ApiResult<(StatusCode, Json<WordRecord>)> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    let created_at = resolve_created_at(request.created_at.as_deref());

    let record = db::words::insert_word(
        &state.db,
        &request.text,
        request.page_url.as_deref(),
        created_at,
    )
    .await?;

    info!(word_id = record.id, word = %record.text, "Word registered");

    // Insert has committed; the task's update now targets a visible row
    enrichment::spawn_enrichment(state.clone(), record.id, record.text.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

/// Resolve a caller-supplied creation timestamp
///
/// Lenient-input policy: an unparseable value falls back to server time with
/// a warning instead of rejecting the request.
fn resolve_created_at(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }

    // Accept offset-less timestamps ("2026-01-15T09:30:00") as UTC
    if let Ok(parsed) = raw.parse::<NaiveDateTime>() {
        return parsed.and_utc();
    }

    warn!(created_at = raw, "Unparseable createdAt, using server time");
    Utc::now()
}

/// DELETE /api/words/{id}
pub async fn delete_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !db::words::delete_word(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("Word not found: {}", id)));
    }

    info!(word_id = id, "Word deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/words
///
/// Empties the store unconditionally; succeeds even when already empty.
pub async fn delete_all_words(State(state): State<AppState>) -> ApiResult<StatusCode> {
    db::words::delete_all_words(&state.db).await?;

    info!("All words deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/words/{id}/fetch
///
/// Manual, synchronous re-enrichment of one word. The same monotone update
/// rules apply; a failed lookup leaves the record unchanged and still
/// returns it, since enrichment stays advisory even when requested
/// explicitly.
pub async fn fetch_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<WordRecord>> {
    let record = db::words::get_word(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word not found: {}", id)))?;

    match state.dictionary.lookup(&record.text).await {
        Ok(enrichment) if !enrichment.is_empty() => {
            db::words::apply_enrichment(
                &state.db,
                id,
                enrichment.pronunciation.as_deref(),
                enrichment.definition.as_deref(),
            )
            .await?;
        }
        Ok(_) => {
            debug!(word_id = id, word = %record.text, "No dictionary data found");
        }
        Err(e) => {
            warn!(word_id = id, word = %record.text, error = %e, "Manual fetch lookup failed");
        }
    }

    let refreshed = db::words::get_word(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word not found: {}", id)))?;

    Ok(Json(refreshed))
}
