//! Song & lyrics service
//!
//! Orchestrates enrichment on creation and delegates everything else to the
//! storage layer. Page and limit are clamped here, before any query runs.

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info, warn};

use songbook_common::config::{RunMode, ServiceConfig};
use songbook_common::pagination::{PageRequest, PaginationMetadata};

use super::song_detail_client::{SongDetailLookup, SongDetails};
use crate::db::{self, SongQuery};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewSong, Song, SongEnrichment, SongFilter, SongPatch};

pub struct SongService {
    db: SqlitePool,
    detail_lookup: Arc<dyn SongDetailLookup>,
    mode: RunMode,
}

impl SongService {
    pub fn new(db: SqlitePool, detail_lookup: Arc<dyn SongDetailLookup>, config: &ServiceConfig) -> Self {
        Self {
            db,
            detail_lookup,
            mode: config.mode,
        }
    }

    /// Look up details, falling back to defaults outside production
    async fn enrich(&self, group: &str, song: &str) -> ApiResult<SongEnrichment> {
        let lookup = self
            .detail_lookup
            .fetch_details(group, song)
            .await
            .and_then(SongDetails::into_enrichment);

        match lookup {
            Ok(enrichment) => Ok(enrichment),
            Err(e) if self.mode.is_strict() => {
                warn!(group = %group, song = %song, "Song detail lookup failed: {}", e);
                Err(ApiError::ServiceUnavailable(e.to_string()))
            }
            Err(e) => {
                warn!(
                    group = %group,
                    song = %song,
                    "Song detail lookup failed, using defaults: {}",
                    e
                );
                Ok(SongEnrichment::default())
            }
        }
    }

    /// Create a song, enriched from the detail API
    pub async fn create_song(&self, group: &str, song: &str) -> ApiResult<Song> {
        let enrichment = self.enrich(group, song).await?;
        let created = db::insert_song(&self.db, &NewSong::new(group, song, enrichment)).await?;

        info!(song_id = created.id, group = %created.group, song = %created.song, "Song created");
        Ok(created)
    }

    /// Delete a song; unknown ids are not an error
    pub async fn delete_song(&self, id: i64) -> ApiResult<()> {
        let removed = db::delete_song(&self.db, id).await?;
        if removed == 0 {
            debug!(song_id = id, "Delete matched no song");
        }
        Ok(())
    }

    /// Filtered, paginated song listing
    pub async fn list_songs(
        &self,
        filter: &SongFilter,
        page: i64,
        limit: i64,
    ) -> ApiResult<(Vec<Song>, PaginationMetadata)> {
        let request = PageRequest::new(page, limit);
        let query = SongQuery::new(filter);

        let total = db::count_songs(&self.db, &query).await?;
        let songs = db::fetch_song_page(&self.db, &query, request).await?;

        Ok((songs, request.metadata(total)))
    }

    /// One page of a song's couplets, in stored order
    pub async fn get_lyrics(
        &self,
        song_id: i64,
        page: i64,
        limit: i64,
    ) -> ApiResult<(Vec<String>, PaginationMetadata)> {
        let request = PageRequest::new(page, limit);

        let total = db::count_couplets(&self.db, song_id).await?;
        let couplets = db::fetch_couplet_page(&self.db, song_id, request).await?;

        Ok((couplets, request.metadata(total)))
    }

    /// Merge-on-null update; unknown ids are a no-op
    pub async fn update_song(&self, id: i64, patch: &SongPatch) -> ApiResult<()> {
        if patch.is_empty() {
            debug!(song_id = id, "Empty patch, nothing to update");
            return Ok(());
        }

        let updated = db::update_song(&self.db, id, patch).await?;
        if updated == 0 {
            debug!(song_id = id, "Update matched no song");
        }
        Ok(())
    }
}
