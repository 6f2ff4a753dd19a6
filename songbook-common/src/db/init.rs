//! Database initialization
//!
//! Schema creation is idempotent: every table uses CREATE TABLE IF NOT EXISTS
//! so the same bootstrap runs on first start and on every restart.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Current schema version recorded in `schema_version`
pub const SCHEMA_VERSION: i64 = 1;

/// Open (creating if needed) the database at `database_url` and ensure the schema
///
/// `max_connections` must be 1 for `sqlite::memory:` URLs, since every pooled
/// connection to an in-memory database sees its own empty database.
pub async fn init_database(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| Error::Config(format!("Invalid database URL '{}': {}", database_url, e)))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Opened database: {}", database_url);

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables on an already-open pool
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_songs_table(pool).await?;

    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Songs table
///
/// `lyrics` holds a JSON array of couplet strings; array order is couplet order.
/// The `*_lc` columns carry Unicode-lowercased copies of the searchable text,
/// written by the application alongside the originals.
async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_name TEXT NOT NULL,
            song TEXT NOT NULL,
            release_date TEXT NOT NULL,
            lyrics TEXT NOT NULL DEFAULT '[]' CHECK (json_valid(lyrics)),
            link TEXT NOT NULL DEFAULT '',
            song_lc TEXT NOT NULL DEFAULT '',
            group_lc TEXT NOT NULL DEFAULT '',
            lyrics_lc TEXT NOT NULL DEFAULT '[]' CHECK (json_valid(lyrics_lc)),
            link_lc TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
