//! wordstash-api - word registration backend
//!
//! Accepts word registrations from the browser extension, serves listings,
//! and enriches records in the background from an external dictionary.

use anyhow::Result;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::info;
use wordstash_api::config::Config;
use wordstash_api::services::dictionary::DictionaryClient;
use wordstash_api::{build_router, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting wordstash-api v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::parse();

    let database_url = config.database_url();
    let pool = db::init_database(&database_url).await?;

    let dictionary = DictionaryClient::new(&config.dictionary_base_url)?;
    info!("Dictionary endpoint: {}", config.dictionary_base_url);

    let state = AppState::new(pool, dictionary);
    let app = build_router(state)
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("wordstash-api listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
