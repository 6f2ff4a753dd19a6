//! Song-detail lookup client
//!
//! Fetches release date, lyric body and link for a (group, song) pair from
//! the external detail API: `GET {base}/info?group=..&song=..`.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use songbook_common::config::ServiceConfig;

use crate::models::{split_couplets, SongEnrichment};

const USER_AGENT: &str = concat!("songbook/", env!("CARGO_PKG_VERSION"));

/// Release date format used by the detail API
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Detail lookup errors
#[derive(Debug, Error)]
pub enum DetailLookupError {
    /// Transport failure, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("Detail API returned status {0}")]
    Status(u16),

    /// Malformed payload
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Detail API response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SongDetails {
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl SongDetails {
    /// Validate the payload and split the lyric body into couplets
    pub fn into_enrichment(self) -> Result<SongEnrichment, DetailLookupError> {
        let release_date = NaiveDate::parse_from_str(self.release_date.trim(), RELEASE_DATE_FORMAT)
            .map_err(|e| {
                DetailLookupError::Parse(format!("releaseDate '{}': {}", self.release_date, e))
            })?;

        Ok(SongEnrichment {
            release_date,
            lyrics: split_couplets(&self.text),
            link: self.link,
        })
    }
}

/// Source of song details, mockable in tests
#[async_trait]
pub trait SongDetailLookup: Send + Sync {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetails, DetailLookupError>;
}

/// reqwest-backed detail client with a bounded request timeout
pub struct HttpSongDetailClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSongDetailClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DetailLookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DetailLookupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, DetailLookupError> {
        Self::new(config.song_detail_api.clone(), config.detail_timeout)
    }
}

#[async_trait]
impl SongDetailLookup for HttpSongDetailClient {
    async fn fetch_details(&self, group: &str, song: &str) -> Result<SongDetails, DetailLookupError> {
        let url = format!("{}/info", self.base_url);

        tracing::debug!(group = %group, song = %song, url = %url, "Querying song detail API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| DetailLookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetailLookupError::Status(status.as_u16()));
        }

        response
            .json::<SongDetails>()
            .await
            .map_err(|e| DetailLookupError::Parse(e.to_string()))
    }
}
