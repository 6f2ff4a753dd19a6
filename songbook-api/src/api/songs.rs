//! Song and lyrics endpoints
//!
//! Extractor rejections are turned into [`ApiError::Validation`] so every
//! failure leaves through the same `{message, errors}` envelope.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use songbook_common::api::{BodyResponse, MessageResponse, PaginatedResponse};
use songbook_common::pagination::{DEFAULT_LYRICS_LIMIT, DEFAULT_SONG_LIMIT};

use crate::error::{ApiError, ApiResult};
use crate::models::{Song, SongFilter, SongPatch};
use crate::AppState;

const DEFAULT_PAGE: i64 = 1;

/// Query parameters for GET /songs
#[derive(Debug, Default, Deserialize)]
pub struct ListSongsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub song: Option<String>,
    pub group: Option<String>,
    /// Exact match, `YYYY-MM-DD`
    pub release_date: Option<NaiveDate>,
    /// Substring looked up in individual couplets
    pub text: Option<String>,
    pub link: Option<String>,
}

impl ListSongsQuery {
    fn filter(&self) -> SongFilter {
        SongFilter {
            song: self.song.clone(),
            group: self.group.clone(),
            release_date: self.release_date,
            text: self.text.clone(),
            link: self.link.clone(),
        }
    }
}

/// Query parameters for GET /songs/:id/lyrics
#[derive(Debug, Default, Deserialize)]
pub struct LyricsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Body of POST /songs
#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub group: String,
}

impl CreateSongRequest {
    /// Collect one message per missing field
    fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();
        if self.song.trim().is_empty() {
            errors.push("song: must not be empty".to_string());
        }
        if self.group.trim().is_empty() {
            errors.push("group: must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

/// GET /songs
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListSongsQuery>, QueryRejection>,
) -> ApiResult<Json<PaginatedResponse<Song>>> {
    let Query(query) = query?;

    let (songs, metadata) = state
        .service
        .list_songs(
            &query.filter(),
            query.page.unwrap_or(DEFAULT_PAGE),
            query.limit.unwrap_or(DEFAULT_SONG_LIMIT),
        )
        .await?;

    Ok(Json(PaginatedResponse::new(
        "songs successfully retrieved",
        songs,
        metadata,
    )))
}

/// GET /songs/:id/lyrics
pub async fn get_lyrics(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<LyricsQuery>, QueryRejection>,
) -> ApiResult<Json<PaginatedResponse<String>>> {
    let Path(id) = id?;
    let Query(query) = query?;

    let (couplets, metadata) = state
        .service
        .get_lyrics(
            id,
            query.page.unwrap_or(DEFAULT_PAGE),
            query.limit.unwrap_or(DEFAULT_LYRICS_LIMIT),
        )
        .await?;

    Ok(Json(PaginatedResponse::new(
        "lyrics successfully retrieved",
        couplets,
        metadata,
    )))
}

/// POST /songs
pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BodyResponse<Song>>)> {
    let Json(request) = body?;
    request.validate()?;

    let song = state
        .service
        .create_song(request.group.trim(), request.song.trim())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BodyResponse::new("song successfully created", song)),
    ))
}

/// PATCH /songs/:id
pub async fn update_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<SongPatch>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(patch) = body?;

    state.service.update_song(id, &patch).await?;
    Ok(Json(MessageResponse::new("song successfully updated")))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;

    state.service.delete_song(id).await?;
    Ok(Json(MessageResponse::new("song successfully deleted")))
}
