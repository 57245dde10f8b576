//! HTTP request handlers
//!
//! Handlers decode transport input, call the catalog and wrap the outcome in
//! the response envelope. No catalog logic lives here.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use super::response::{ApiError, ApiResult};
use crate::core::catalog::Catalog;
use crate::core::filter::{RawFilter, RawVerseRange, SongFilter};
use crate::core::models::Song;

type HandlerResult<T> = Result<T, ApiError>;

/// Body of `POST /songs`
#[derive(Debug, Deserialize)]
pub struct NewSong {
    #[serde(default, alias = "title")]
    pub song: String,
    #[serde(default)]
    pub group: String,
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    debug!("Body rejected: {}", rejection);
    ApiError::BadRequest("Can't decode json body".to_string())
}

fn bad_query(rejection: QueryRejection) -> ApiError {
    debug!("Query rejected: {}", rejection);
    ApiError::BadRequest(rejection.body_text())
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// POST /songs
pub async fn create_song(
    State(catalog): State<Arc<Catalog>>,
    body: Result<Json<NewSong>, JsonRejection>,
) -> HandlerResult<ApiResult> {
    let Json(new_song) = body.map_err(bad_body)?;

    let song = catalog.create(&new_song.song, &new_song.group).await?;
    Ok(ApiResult::Songs(vec![song]))
}

/// GET /songs
pub async fn list_songs(
    State(catalog): State<Arc<Catalog>>,
    query: Result<Query<RawFilter>, QueryRejection>,
) -> HandlerResult<ApiResult> {
    let Query(raw) = query.map_err(bad_query)?;
    let filter = SongFilter::from_raw(&raw)?;
    let songs = catalog.list(&filter).await?;
    Ok(ApiResult::Songs(songs))
}

/// PUT /songs
pub async fn update_song(
    State(catalog): State<Arc<Catalog>>,
    body: Result<Json<Song>, JsonRejection>,
) -> HandlerResult<ApiResult> {
    let Json(song) = body.map_err(bad_body)?;

    if catalog.update(&song).await? {
        Ok(ApiResult::Empty)
    } else {
        Err(ApiError::song_not_found(song.id))
    }
}

/// DELETE /songs?id=N
pub async fn delete_song(
    State(catalog): State<Arc<Catalog>>,
    query: Result<Query<RawFilter>, QueryRejection>,
) -> HandlerResult<StatusCode> {
    let Query(raw) = query.map_err(bad_query)?;
    let id = SongFilter::from_raw(&raw)?.id;
    if id < 1 {
        return Err(ApiError::BadRequest("id must be a positive integer".to_string()));
    }

    if catalog.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::song_not_found(id))
    }
}

/// GET /songs/:id/verses
pub async fn song_verses(
    State(catalog): State<Arc<Catalog>>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<RawVerseRange>, QueryRejection>,
) -> HandlerResult<ApiResult> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Query(raw) = query.map_err(bad_query)?;
    let range = raw.normalize()?;

    match catalog.verses(id, range).await? {
        Some(verses) => Ok(ApiResult::Verses(verses)),
        None => Err(ApiError::song_not_found(id)),
    }
}
