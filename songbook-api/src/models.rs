//! Song catalog domain types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Separator between couplets in a lyric body (a blank line)
pub const COUPLET_SEPARATOR: &str = "\n\n";

/// Release date recorded when enrichment is unavailable
pub fn default_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// Stored song record
///
/// Serialized field names follow the public API (`text` carries the couplets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub song: String,
    pub group: String,
    pub release_date: NaiveDate,
    #[serde(rename = "text")]
    pub lyrics: Vec<String>,
    pub link: String,
}

/// Song about to be inserted (no id yet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    pub release_date: NaiveDate,
    pub lyrics: Vec<String>,
    pub link: String,
}

impl NewSong {
    pub fn new(group: impl Into<String>, song: impl Into<String>, enrichment: SongEnrichment) -> Self {
        Self {
            group: group.into(),
            song: song.into(),
            release_date: enrichment.release_date,
            lyrics: enrichment.lyrics,
            link: enrichment.link,
        }
    }
}

/// Metadata fetched from the song-detail service at creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEnrichment {
    pub release_date: NaiveDate,
    pub lyrics: Vec<String>,
    pub link: String,
}

impl Default for SongEnrichment {
    /// Fallback used in development mode when the lookup fails
    fn default() -> Self {
        Self {
            release_date: default_release_date(),
            lyrics: Vec::new(),
            link: String::new(),
        }
    }
}

/// Optional per-field constraints for song listing
///
/// `None` means "no constraint on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub song: Option<String>,
    pub group: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Substring looked up in individual couplets
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongFilter {
    /// Lyric filtering needs one row per couplet
    pub fn expands_couplets(&self) -> bool {
        self.text.is_some()
    }
}

/// Partial update: `Some` overwrites, `None` leaves the stored value alone
///
/// `text: Some(vec![])` clears the lyrics; an absent (or `null`) `text`
/// keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SongPatch {
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub text: Option<Vec<String>>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SongPatch {
    pub fn is_empty(&self) -> bool {
        self.song.is_none()
            && self.group.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }
}

/// Split a lyric body into couplets on blank lines
///
/// A blank body has no couplets.
pub fn split_couplets(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split(COUPLET_SEPARATOR).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_couplets() {
        let text = "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?\n\nYou caught me under false pretenses\nHow long before you let me go?";
        let couplets = split_couplets(text);
        assert_eq!(couplets.len(), 2);
        assert!(couplets[0].starts_with("Ooh baby"));
        assert!(couplets[1].ends_with("let me go?"));
    }

    #[test]
    fn test_split_couplets_blank_body() {
        assert!(split_couplets("").is_empty());
        assert!(split_couplets("  \n ").is_empty());
    }

    #[test]
    fn test_single_couplet() {
        assert_eq!(split_couplets("one\nblock"), vec!["one\nblock".to_string()]);
    }

    #[test]
    fn test_default_enrichment() {
        let e = SongEnrichment::default();
        assert_eq!(e.release_date.to_string(), "2000-01-01");
        assert!(e.lyrics.is_empty());
        assert!(e.link.is_empty());
    }

    #[test]
    fn test_song_json_shape() {
        let song = Song {
            id: 7,
            song: "Angel".into(),
            group: "Massive Attack".into(),
            release_date: NaiveDate::from_ymd_opt(1998, 4, 20).unwrap(),
            lyrics: vec!["You are my angel".into()],
            link: "https://example.com".into(),
        };

        let json = serde_json::to_value(&song).unwrap();
        assert_eq!(json["release_date"], "1998-04-20");
        assert_eq!(json["text"][0], "You are my angel");
        assert_eq!(json["group"], "Massive Attack");
    }

    #[test]
    fn test_patch_distinguishes_empty_lyrics_from_absent() {
        let absent: SongPatch = serde_json::from_str(r#"{"group": "X"}"#).unwrap();
        assert_eq!(absent.group.as_deref(), Some("X"));
        assert!(absent.text.is_none());
        assert!(absent.song.is_none());

        let cleared: SongPatch = serde_json::from_str(r#"{"text": []}"#).unwrap();
        assert_eq!(cleared.text, Some(Vec::new()));

        let dated: SongPatch = serde_json::from_str(r#"{"release_date": "2006-07-16"}"#).unwrap();
        assert_eq!(dated.release_date, NaiveDate::from_ymd_opt(2006, 7, 16));
    }

    #[test]
    fn test_filter_expansion_flag() {
        let mut filter = SongFilter::default();
        assert!(!filter.expands_couplets());

        filter.text = Some("night".into());
        assert!(filter.expands_couplets());
    }
}
