//! Song persistence
//!
//! Each function is a single statement; count/page pairs are issued by the
//! service as two independent reads without a surrounding transaction.

use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use songbook_common::pagination::PageRequest;
use songbook_common::Result;

use super::query::{fold_case, SongQuery, SONG_COLUMNS};
use crate::models::{NewSong, Song, SongPatch};

fn fold_lyrics(lyrics: &[String]) -> Vec<String> {
    lyrics.iter().map(|couplet| fold_case(couplet)).collect()
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let Json(lyrics): Json<Vec<String>> = row.try_get("lyrics")?;

    Ok(Song {
        id: row.try_get("id")?,
        song: row.try_get("song")?,
        group: row.try_get("group_name")?,
        release_date: row.try_get("release_date")?,
        lyrics,
        link: row.try_get("link")?,
    })
}

/// Insert a song and return it with its storage-assigned id
pub async fn insert_song(pool: &SqlitePool, new_song: &NewSong) -> Result<Song> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs (
            group_name, song, release_date, lyrics, link,
            group_lc, song_lc, lyrics_lc, link_lc
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new_song.group)
    .bind(&new_song.song)
    .bind(new_song.release_date)
    .bind(Json(new_song.lyrics.clone()))
    .bind(&new_song.link)
    .bind(fold_case(&new_song.group))
    .bind(fold_case(&new_song.song))
    .bind(Json(fold_lyrics(&new_song.lyrics)))
    .bind(fold_case(&new_song.link))
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    debug!(song_id = id, "song created");

    Ok(Song {
        id,
        song: new_song.song.clone(),
        group: new_song.group.clone(),
        release_date: new_song.release_date,
        lyrics: new_song.lyrics.clone(),
        link: new_song.link.clone(),
    })
}

/// Delete by id; returns the number of rows removed (0 for unknown ids)
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    debug!(song_id = id, rows = result.rows_affected(), "song deleted");
    Ok(result.rows_affected())
}

/// Merge-on-null update: NULL binds keep the stored column via COALESCE
///
/// Each overwritten column rewrites its folded shadow column too.
/// Returns the number of rows touched (0 for unknown ids).
pub async fn update_song(pool: &SqlitePool, id: i64, patch: &SongPatch) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE songs SET
            song = COALESCE(?, song),
            group_name = COALESCE(?, group_name),
            release_date = COALESCE(?, release_date),
            lyrics = COALESCE(?, lyrics),
            link = COALESCE(?, link),
            song_lc = COALESCE(?, song_lc),
            group_lc = COALESCE(?, group_lc),
            lyrics_lc = COALESCE(?, lyrics_lc),
            link_lc = COALESCE(?, link_lc)
        WHERE id = ?
        "#,
    )
    .bind(patch.song.as_deref())
    .bind(patch.group.as_deref())
    .bind(patch.release_date)
    .bind(patch.text.clone().map(Json))
    .bind(patch.link.as_deref())
    .bind(patch.song.as_deref().map(fold_case))
    .bind(patch.group.as_deref().map(fold_case))
    .bind(patch.text.as_deref().map(fold_lyrics).map(Json))
    .bind(patch.link.as_deref().map(fold_case))
    .bind(id)
    .execute(pool)
    .await?;

    debug!(song_id = id, rows = result.rows_affected(), "song updated");
    Ok(result.rows_affected())
}

/// Number of distinct songs matching the query
pub async fn count_songs(pool: &SqlitePool, query: &SongQuery) -> Result<i64> {
    let mut qb = query.count_query();
    let total = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(total)
}

/// One page of songs matching the query
pub async fn fetch_song_page(
    pool: &SqlitePool,
    query: &SongQuery,
    page: PageRequest,
) -> Result<Vec<Song>> {
    let mut qb = query.page_query(page);
    let rows = qb.build().fetch_all(pool).await?;

    rows.iter().map(song_from_row).collect()
}

/// Number of couplets stored for a song (0 for unknown ids)
pub async fn count_couplets(pool: &SqlitePool, song_id: i64) -> Result<i64> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM songs s, json_each(s.lyrics) AS c WHERE s.id = ?",
    )
    .bind(song_id)
    .fetch_one(pool)
    .await?;

    Ok(total)
}

/// Couplets of a song at positions `[offset, offset + limit)` in stored order
pub async fn fetch_couplet_page(
    pool: &SqlitePool,
    song_id: i64,
    page: PageRequest,
) -> Result<Vec<String>> {
    let couplets: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT c.value
        FROM songs s, json_each(s.lyrics) AS c
        WHERE s.id = ?
        ORDER BY c.key ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(song_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(couplets)
}
