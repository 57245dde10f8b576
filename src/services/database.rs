use std::sync::Arc;

use crate::core::data::{Database, SongQuery};
use crate::core::filter::SongFilter;
use crate::core::models::Song;
use crate::error::Result;

/// Record store operations the catalog depends on.
///
/// `update` and `delete` return whether a row matched; a miss is an outcome,
/// not an error.
#[async_trait::async_trait]
pub trait SongStore: Send + Sync {
    async fn create(&self, song: &Song) -> Result<i64>;
    async fn update(&self, song: &Song) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn scan(&self, query: &SongQuery) -> Result<Vec<Song>>;

    /// Single song by id, as a scan with an id-only filter.
    async fn get(&self, id: i64) -> Result<Option<Song>> {
        let songs = self.scan(&SongQuery::build(&SongFilter::by_id(id))).await?;
        Ok(songs.into_iter().next())
    }
}

/// `SongStore` over the SQLite `Database`. Each call runs on the blocking
/// pool so a busy connection never stalls the async workers.
#[derive(Clone)]
pub struct SqliteStore {
    database: Arc<Database>,
}

impl SqliteStore {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

#[async_trait::async_trait]
impl SongStore for SqliteStore {
    async fn create(&self, song: &Song) -> Result<i64> {
        let db = self.database.clone();
        let song = song.clone();
        tokio::task::spawn_blocking(move || db.insert_song(&song)).await?
    }

    async fn update(&self, song: &Song) -> Result<bool> {
        let db = self.database.clone();
        let song = song.clone();
        tokio::task::spawn_blocking(move || db.update_song(&song)).await?
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let db = self.database.clone();
        tokio::task::spawn_blocking(move || db.delete_song(id)).await?
    }

    async fn scan(&self, query: &SongQuery) -> Result<Vec<Song>> {
        let db = self.database.clone();
        let query = query.clone();
        tokio::task::spawn_blocking(move || db.scan(&query)).await?
    }

    async fn get(&self, id: i64) -> Result<Option<Song>> {
        let db = self.database.clone();
        tokio::task::spawn_blocking(move || db.get_song(id)).await?
    }
}
