//! HTTP server setup and routing

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use super::handlers;
use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::error::{Result, SongLibError};
use crate::signal_handler::shutdown_signal;

/// Build the API router over a catalog
pub fn build_router(catalog: Arc<Catalog>, request_timeout: Duration) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health))

        // Song collection
        .route(
            "/songs",
            get(handlers::list_songs)
                .post(handlers::create_song)
                .put(handlers::update_song)
                .delete(handlers::delete_song),
        )

        // Verse pages of a single song
        .route("/songs/:id/verses", get(handlers::song_verses))

        .with_state(catalog)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Run HTTP API server until Ctrl-C or SIGTERM
pub async fn run(config: &Config, catalog: Arc<Catalog>) -> Result<()> {
    let addr = config.server_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    let app = build_router(catalog, config.request_timeout());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SongLibError::Internal(e.into()))?;

    info!("API server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Database;
    use crate::core::models::SongDetails;
    use crate::error::NetworkError;
    use crate::services::{SongLookup, SqliteStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt; // for `oneshot`
    use tracing::Span;

    struct FixedLookup;

    #[async_trait::async_trait]
    impl SongLookup for FixedLookup {
        async fn lookup(&self, _title: &str, _group: &str) -> Result<SongDetails> {
            Ok(SongDetails {
                text: "v1\n\nv2\n\nv3".to_string(),
                link: "https://example.com/watch".to_string(),
                release_date: "16.07.2006".to_string(),
            })
        }
    }

    struct DownLookup;

    #[async_trait::async_trait]
    impl SongLookup for DownLookup {
        async fn lookup(&self, _title: &str, _group: &str) -> Result<SongDetails> {
            Err(NetworkError::Status { status: 500 }.into())
        }
    }

    fn app_with(lookup: Arc<dyn SongLookup>) -> Router {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let store = Arc::new(SqliteStore::new(db));
        let catalog = Arc::new(Catalog::new(store, lookup, Span::none()));
        build_router(catalog, Duration::from_secs(5))
    }

    fn app() -> Router {
        app_with(Arc::new(FixedLookup))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create(app: &Router, song: &str, group: &str) -> i64 {
        let (status, body) =
            send(app, "POST", "/songs", Some(json!({ "song": song, "group": group }))).await;
        assert_eq!(status, StatusCode::OK);
        body["result"][0]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_create_returns_enriched_song() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/songs",
            Some(json!({ "song": "Supermassive Black Hole", "group": "Muse" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Ok");
        let song = &body["result"][0];
        assert_eq!(song["id"], 1);
        assert_eq!(song["song"], "Supermassive Black Hole");
        assert_eq!(song["group"], "Muse");
        assert_eq!(song["releaseDate"], "16.07.2006");
        assert_eq!(song["link"], "https://example.com/watch");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_bodies() {
        let app = app();

        let request = Request::builder()
            .method("POST")
            .uri("/songs")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "POST", "/songs", Some(json!({ "song": "", "group": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "Error");
    }

    #[tokio::test]
    async fn test_create_maps_lookup_failure_to_bad_gateway() {
        let app = app_with(Arc::new(DownLookup));
        let (status, body) = send(&app, "POST", "/songs", Some(json!({ "song": "a", "group": "b" }))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "Error");

        let (_, body) = send(&app, "GET", "/songs", None).await;
        assert_eq!(body["result"], json!([]));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let app = app();
        create(&app, "One", "X").await;
        create(&app, "Two", "Y").await;
        create(&app, "Three", "X").await;

        let (status, body) = send(&app, "GET", "/songs?group=X", None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body["result"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["song"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["One", "Three"]);

        let (_, body) = send(&app, "GET", "/songs?limit=1&offset=1", None).await;
        assert_eq!(body["result"].as_array().unwrap().len(), 1);
        assert_eq!(body["result"][0]["song"], "Two");

        let (_, body) = send(&app, "GET", "/songs?verse=2", None).await;
        assert!(body["result"].as_array().unwrap().iter().all(|s| s["text"] == "v2"));
    }

    #[tokio::test]
    async fn test_undecodable_query_uses_error_envelope() {
        let app = app();
        let id = create(&app, "Song", "Group").await;

        let (status, body) = send(&app, "GET", "/songs?id=1&id=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "Error");

        let (status, body) = send(&app, "DELETE", "/songs?id=1&id=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "Error");

        let uri = format!("/songs/{}/verses?limit=1&limit=2", id);
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "Error");
    }

    #[tokio::test]
    async fn test_list_rejects_non_integer_filter() {
        let (status, body) = send(&app(), "GET", "/songs?limit=ten", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "limit must be int, got 'ten'");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = app();
        let id = create(&app, "Song", "Group").await;

        let updated = json!({
            "id": id,
            "song": "Song",
            "group": "Group",
            "text": "only verse",
            "link": "https://example.com/new",
            "releaseDate": "01.01.2000",
        });
        let (status, body) = send(&app, "PUT", "/songs", Some(updated.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "Ok" }));

        let (_, body) = send(&app, "GET", &format!("/songs?id={}", id), None).await;
        assert_eq!(body["result"][0]["text"], "only verse");

        let (status, body) = send(&app, "PUT", "/songs", Some(json!({ "id": id }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation error: song and group must not be empty");
        let (_, body) = send(&app, "GET", &format!("/songs?id={}", id), None).await;
        assert_eq!(body["result"][0]["song"], "Song");

        let mut missing = updated;
        missing["id"] = json!(id + 10);
        let (status, _) = send(&app, "PUT", "/songs", Some(missing)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", &format!("/songs?id={}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/songs?id={}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/songs", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "DELETE", "/songs?id=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verse_pages() {
        let app = app();
        let id = create(&app, "Song", "Group").await;

        let (status, body) = send(&app, "GET", &format!("/songs/{}/verses?limit=2&offset=1", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], json!(["v2", "v3"]));

        let (status, body) = send(&app, "GET", &format!("/songs/{}/verses?offset=7", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], json!([]));

        let (status, _) = send(&app, "GET", "/songs/99/verses", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", &format!("/songs/{}/verses?limit=x", id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/songs/abc/verses", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
