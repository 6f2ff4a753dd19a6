//! Service layer
//!
//! - `song_detail_client`: external song-detail lookup (enrichment source)
//! - `song_service`: song and lyrics operations

pub mod song_detail_client;
pub mod song_service;

pub use song_detail_client::{DetailLookupError, HttpSongDetailClient, SongDetailLookup, SongDetails};
pub use song_service::SongService;
