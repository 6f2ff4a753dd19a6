//! Song storage layer
//!
//! `query` composes the dynamic filter SQL; `songs` executes it together
//! with the fixed-shape statements (insert, update, delete, lyrics).

pub mod query;
pub mod songs;

pub use query::{like_pattern, SongQuery};
pub use songs::{
    count_couplets, count_songs, delete_song, fetch_couplet_page, fetch_song_page, insert_song,
    update_song,
};
