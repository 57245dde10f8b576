//! Stand-in for the song details service
//!
//! Answers every `GET /info` with the same four verses, a fixed link and
//! today's date, so the catalog can be run and tested without the real
//! upstream.

use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::models::SongDetails;
use crate::error::{Result, SongLibError};

pub const STUB_TEXT: &str = "first verse\n\nsecond verse\n\nthird verse\n\nfourth verse\n\n";
pub const STUB_LINK: &str = "https://www.youtube.com/watch?v=HIcSWuKMwOw";

#[derive(Debug, Deserialize)]
struct InfoQuery {
    song: Option<String>,
    group: Option<String>,
}

async fn info(Query(query): Query<InfoQuery>) -> Json<SongDetails> {
    debug!(
        "Stub lookup for {} - {}",
        query.group.as_deref().unwrap_or(""),
        query.song.as_deref().unwrap_or("")
    );

    Json(SongDetails {
        text: STUB_TEXT.to_string(),
        link: STUB_LINK.to_string(),
        release_date: chrono::Local::now().format("%d.%m.%Y").to_string(),
    })
}

pub fn router() -> Router {
    Router::new().route("/info", get(info))
}

/// Serve the stub on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Stub lookup API listening on {}", addr);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SongLibError::Internal(e.into()))
}

/// Bind `addr` and serve the stub in a background task.
pub async fn spawn(addr: SocketAddr) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, std::future::pending()).await {
            warn!("Stub lookup API stopped: {}", e);
        }
    });

    Ok((local, handle))
}
