//! wordstash-api library - word registration and asynchronous enrichment
//!
//! A client registers words as it encounters them; the write is acknowledged
//! immediately with a stable id, and a detached background task later
//! attaches pronunciation and definition fetched from an external dictionary.
//! Enrichment is best-effort: it may never complete and no caller ever
//! observes its failures.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::dictionary::DictionaryClient;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

/// Application state shared across HTTP handlers and enrichment tasks
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Dictionary lookup client (shared; reqwest client reuse)
    pub dictionary: Arc<DictionaryClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, dictionary: DictionaryClient) -> Self {
        Self {
            db,
            dictionary: Arc::new(dictionary),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route(
            "/api/words",
            get(api::list_words)
                .post(api::create_word)
                .delete(api::delete_all_words),
        )
        .route("/api/words/:id", delete(api::delete_word))
        .route("/api/words/:id/fetch", post(api::fetch_word))
        .merge(api::health_routes())
        .with_state(state)
}
