//! HTTP API handlers for songbook-api

pub mod health;
pub mod songs;

pub use health::health_routes;
pub use songs::{create_song, delete_song, get_lyrics, list_songs, update_song};
