//! HTTP API handlers for wordstash-api

pub mod health;
pub mod words;

pub use health::health_routes;
pub use words::{create_word, delete_all_words, delete_word, fetch_word, list_words};
