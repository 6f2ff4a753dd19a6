//! HttpSongDetailClient against a throwaway local detail server

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use songbook_api::services::{DetailLookupError, HttpSongDetailClient, SongDetailLookup};

#[derive(Debug, Deserialize)]
struct InfoQuery {
    group: String,
    song: String,
}

/// Behaviour depends on the requested song title
async fn info(Query(query): Query<InfoQuery>) -> Response {
    match query.song.as_str() {
        "Supermassive Black Hole" => Json(json!({
            "releaseDate": "2006-07-16",
            "text": format!("{} couplet one\n\ncouplet two", query.group),
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
        }))
        .into_response(),
        "Broken" => (StatusCode::OK, "not json").into_response(),
        "Slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::OK.into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Spawn the fake server and return its base URL
async fn spawn_detail_server() -> String {
    let app = Router::new().route("/info", get(info));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_fetch_details_success() {
    let base = spawn_detail_server().await;
    let client = HttpSongDetailClient::new(base, Duration::from_secs(5)).unwrap();

    let details = client.fetch_details("Muse", "Supermassive Black Hole").await.unwrap();
    assert_eq!(details.release_date, "2006-07-16");
    // Group arrives intact through query encoding
    assert_eq!(details.text, "Muse couplet one\n\ncouplet two");

    let enrichment = details.into_enrichment().unwrap();
    assert_eq!(enrichment.lyrics.len(), 2);
}

#[tokio::test]
async fn test_non_success_status() {
    let base = spawn_detail_server().await;
    let client = HttpSongDetailClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client.fetch_details("Muse", "Missing").await.unwrap_err();
    assert!(matches!(err, DetailLookupError::Status(404)));
}

#[tokio::test]
async fn test_malformed_payload() {
    let base = spawn_detail_server().await;
    let client = HttpSongDetailClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client.fetch_details("Muse", "Broken").await.unwrap_err();
    assert!(matches!(err, DetailLookupError::Parse(_)));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let base = spawn_detail_server().await;
    let client = HttpSongDetailClient::new(base, Duration::from_millis(200)).unwrap();

    let err = client.fetch_details("Muse", "Slow").await.unwrap_err();
    assert!(matches!(err, DetailLookupError::Network(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpSongDetailClient::new(format!("http://{}", addr), Duration::from_secs(1)).unwrap();
    let err = client.fetch_details("Muse", "Anything").await.unwrap_err();
    assert!(matches!(err, DetailLookupError::Network(_)));
}
