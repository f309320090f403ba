//! Configuration for wordstash-api
//!
//! Everything is read once at startup, from CLI flags with environment
//! variable fallback. Without a DATABASE_URL the service runs against a
//! local SQLite file, which is the development setup.

use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing::warn;

const DEFAULT_DATABASE_FILE: &str = "wordstash.db";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone, Parser)]
#[command(name = "wordstash-api", about = "Word registration and enrichment API")]
pub struct Config {
    /// SQLite connection string; defaults to a local database file
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Comma-separated list of allowed CORS origins
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ORIGINS)]
    pub allowed_origins: String,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the dictionary lookup endpoint
    #[arg(
        long,
        env = "DICTIONARY_BASE_URL",
        default_value = crate::services::dictionary::DEFAULT_BASE_URL
    )]
    pub dictionary_base_url: String,
}

impl Config {
    /// Effective connection string, with the development file fallback
    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}?mode=rwc", DEFAULT_DATABASE_FILE))
    }

    /// Parsed origin allow-list
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// CORS layer restricted to the configured origins
    ///
    /// Browser callers send credentials, so methods and headers are explicit
    /// lists; wildcards cannot be combined with allow_credentials.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .origins()
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}
