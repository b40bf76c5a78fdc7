//! HTTP front-end.
//!
//! Routes:
//!
//! - `GET /` paginated listing of every feed's entries
//! - `GET /search?q=` title search across all feeds
//! - `GET /summarize?url=` summary of one article
//! - `GET|POST /add_source` add a feed source

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::SourceStore;

mod error;
pub mod handlers;
pub mod render;

pub use error::AppError;

/// Shared by every handler.
pub struct AppState {
    pub store: SourceStore,
    pub client: reqwest::Client,
    pub config: Config,
}

impl AppState {
    pub fn new(store: SourceStore, client: reqwest::Client, config: Config) -> Self {
        Self {
            store,
            client,
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        .route("/summarize", get(handlers::summarize))
        .route(
            "/add_source",
            get(handlers::add_source_form).post(handlers::add_source),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
