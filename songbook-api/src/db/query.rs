//! Dynamic song filter composition
//!
//! Both the count and the page statement are built from the same `matched`
//! CTE, so the total reported in pagination metadata always describes the
//! same row set the page is cut from.
//!
//! Pipeline when a lyric filter is present:
//! expand (one row per couplet, or one NULL placeholder row for a song with
//! no couplets) -> filter -> distinct by id -> order by id ascending.
//!
//! Text filters match against the `*_lc` shadow columns, which hold the same
//! values folded with [`fold_case`]. SQLite's `LOWER()` only folds ASCII.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use songbook_common::pagination::PageRequest;

use crate::models::SongFilter;

/// Columns selected for a full song row, in `song_from_row` order
pub const SONG_COLUMNS: &str = "s.id, s.song, s.group_name, s.release_date, s.lyrics, s.link";

/// Unicode case folding shared by stored shadow columns and filter patterns
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Normalize a user substring into a case-insensitive LIKE pattern
///
/// Surrounding spaces and `%` markers are stripped before wrapping, so
/// `"%Angel %"` and `"angel"` produce the same pattern.
pub fn like_pattern(raw: &str) -> String {
    let core = raw.trim_matches(|c: char| c == ' ' || c == '%');
    format!("%{}%", fold_case(core))
}

/// A [`SongFilter`] with every value normalized and ready to bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    song: Option<String>,
    group: Option<String>,
    release_date: Option<NaiveDate>,
    text: Option<String>,
    link: Option<String>,
    expand_couplets: bool,
}

impl SongQuery {
    pub fn new(filter: &SongFilter) -> Self {
        Self {
            song: filter.song.as_deref().map(like_pattern),
            group: filter.group.as_deref().map(like_pattern),
            release_date: filter.release_date,
            text: filter.text.as_deref().map(like_pattern),
            link: filter.link.as_deref().map(like_pattern),
            expand_couplets: filter.expands_couplets(),
        }
    }

    pub fn expands_couplets(&self) -> bool {
        self.expand_couplets
    }

    /// `SELECT COUNT(*)` over the matched songs
    pub fn count_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("");
        self.push_matched_cte(&mut qb);
        qb.push("SELECT COUNT(*) FROM matched");
        qb
    }

    /// One page of matched songs, ordered by id
    pub fn page_query(&self, page: PageRequest) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("");
        self.push_matched_cte(&mut qb);
        qb.push("SELECT ");
        qb.push(SONG_COLUMNS);
        qb.push(" FROM songs s JOIN matched m ON m.id = s.id ORDER BY s.id ASC LIMIT ");
        qb.push_bind(page.limit);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());
        qb
    }

    fn push_matched_cte(&self, qb: &mut QueryBuilder<'static, Sqlite>) {
        qb.push("WITH matched AS (SELECT DISTINCT s.id AS id FROM songs s");
        if self.expand_couplets {
            qb.push(" LEFT JOIN json_each(s.lyrics_lc) AS c ON 1 = 1");
        }
        qb.push(" WHERE 1 = 1");
        self.push_predicate(qb);
        qb.push(") ");
    }

    /// Append one `AND` clause per present filter; none means match all
    fn push_predicate(&self, qb: &mut QueryBuilder<'static, Sqlite>) {
        if let Some(pattern) = &self.song {
            qb.push(" AND s.song_lc LIKE ");
            qb.push_bind(pattern.clone());
        }
        if let Some(pattern) = &self.group {
            qb.push(" AND s.group_lc LIKE ");
            qb.push_bind(pattern.clone());
        }
        if let Some(date) = self.release_date {
            qb.push(" AND s.release_date = ");
            qb.push_bind(date);
        }
        if let Some(pattern) = &self.text {
            qb.push(" AND c.value LIKE ");
            qb.push_bind(pattern.clone());
        }
        if let Some(pattern) = &self.link {
            qb.push(" AND s.link_lc LIKE ");
            qb.push_bind(pattern.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_normalization() {
        assert_eq!(like_pattern("Angel"), "%angel%");
        assert_eq!(like_pattern("%Angel %"), "%angel%");
        assert_eq!(like_pattern("  massive attack  "), "%massive attack%");
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("ГРУППА Крови"), "%группа крови%");
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let query = SongQuery::new(&SongFilter::default());
        let qb = query.count_query();

        assert!(!query.expands_couplets());
        assert!(qb.sql().contains("WHERE 1 = 1)"));
        assert!(!qb.sql().contains("json_each"));
    }

    #[test]
    fn test_count_and_page_share_predicate() {
        let filter = SongFilter {
            song: Some("angel".into()),
            group: Some("Massive".into()),
            release_date: NaiveDate::from_ymd_opt(1998, 4, 20),
            text: Some("love".into()),
            link: Some("example".into()),
        };
        let query = SongQuery::new(&filter);

        let count = query.count_query();
        let page = query.page_query(PageRequest::new(2, 5));

        let count_cte = count.sql().split(") SELECT").next().unwrap().to_string();
        let page_cte = page.sql().split(") SELECT").next().unwrap().to_string();
        assert_eq!(count_cte, page_cte);

        assert!(count_cte.contains("LEFT JOIN json_each(s.lyrics_lc)"));
        assert!(count_cte.contains("c.value LIKE"));
        assert!(count_cte.contains("s.song_lc LIKE"));
        assert!(count_cte.contains("s.release_date ="));
        assert!(page.sql().contains("ORDER BY s.id ASC"));
    }

    #[test]
    fn test_lyric_filter_enables_expansion() {
        let filter = SongFilter {
            text: Some("night".into()),
            ..Default::default()
        };
        assert!(SongQuery::new(&filter).expands_couplets());

        let filter = SongFilter {
            song: Some("night".into()),
            ..Default::default()
        };
        let query = SongQuery::new(&filter);
        assert!(!query.expands_couplets());
        assert!(!query.count_query().sql().contains("c.value"));
    }
}
