//! Integration tests for on-disk database initialization
//!
//! Tests cover:
//! - Database file is created on first run
//! - Reopening an existing database keeps its rows

use songbook_common::db::init_database;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songbook.db");
    assert!(!db_path.exists());

    let url = format!("sqlite://{}", db_path.display());
    let result = init_database(&url, 2).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("songbook.db").display());

    let pool = init_database(&url, 2).await.unwrap();
    sqlx::query("INSERT INTO songs (group_name, song, release_date) VALUES ('Muse', 'Uprising', '2009-09-07')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    // Second open must keep data and not fail on existing tables
    let pool = init_database(&url, 2).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
