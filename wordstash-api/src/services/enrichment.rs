//! Background enrichment task
//!
//! One detached task per successful registration. Enrichment is advisory:
//! every failure (network, parse, storage) stops at the task boundary and is
//! logged; the registration response has already been sent and listings work
//! whether or not pronunciation/definition ever populate. There is no
//! automatic retry.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db;
use crate::services::dictionary::DictionaryClient;
use crate::AppState;

/// Spawn the enrichment task for a freshly registered word
///
/// Called after the insert has committed, so the task's update targets a row
/// that is already visible to readers. The handler never awaits the result.
pub fn spawn_enrichment(state: AppState, id: i64, text: String) {
    tokio::spawn(async move {
        if let Err(e) = enrich_word(&state.db, &state.dictionary, id, &text).await {
            warn!(word_id = id, word = %text, error = %e, "Enrichment task failed");
        }
    });
}

/// Look up a word and apply whatever the dictionary returned
///
/// Runs once per registration. The lookup happens entirely outside any store
/// transaction; applying the result is a single short UPDATE opened fresh
/// here. A record deleted mid-flight is the expected race and ends the task
/// silently.
pub async fn enrich_word(
    pool: &SqlitePool,
    dictionary: &DictionaryClient,
    id: i64,
    text: &str,
) -> anyhow::Result<()> {
    let enrichment = dictionary.lookup(text).await?;

    if enrichment.is_empty() {
        debug!(word_id = id, word = %text, "No dictionary data found");
        return Ok(());
    }

    let updated = db::words::apply_enrichment(
        pool,
        id,
        enrichment.pronunciation.as_deref(),
        enrichment.definition.as_deref(),
    )
    .await?;

    if updated {
        info!(
            word_id = id,
            word = %text,
            pronunciation = enrichment.pronunciation.as_deref().unwrap_or(""),
            "Word enriched"
        );
    } else {
        debug!(word_id = id, word = %text, "Word deleted before enrichment applied");
    }

    Ok(())
}
