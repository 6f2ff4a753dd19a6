//! songbook-api library - song catalog service
//!
//! Stores songs with their lyrics split into couplets, enriches new songs
//! from an external song-detail API, and serves filtered, paginated
//! listings over HTTP.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use services::SongService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SongService>,
}

impl AppState {
    pub fn new(service: SongService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch};

    Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route("/songs/:id", patch(api::update_song).delete(api::delete_song))
        .route("/songs/:id/lyrics", get(api::get_lyrics))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
