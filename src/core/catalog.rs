//! Song catalog operations
//!
//! Composes the lookup service and the record store. Creation enriches
//! first and persists second, so a song only gets an id once its text, link
//! and date are known. Reads go through the query builder and optionally
//! through the verse segmenter.

use std::sync::Arc;
use tracing::{debug, info, warn, Instrument, Span};

use crate::core::data::SongQuery;
use crate::core::filter::SongFilter;
use crate::core::models::Song;
use crate::core::verses::{self, VerseRange};
use crate::error::{Result, SongLibError};
use crate::services::{SongLookup, SongStore};

pub struct Catalog {
    store: Arc<dyn SongStore>,
    lookup: Arc<dyn SongLookup>,
    span: Span,
}

impl Catalog {
    pub fn new(store: Arc<dyn SongStore>, lookup: Arc<dyn SongLookup>, span: Span) -> Self {
        Self { store, lookup, span }
    }

    pub async fn create(&self, title: &str, group: &str) -> Result<Song> {
        let span = tracing::debug_span!(parent: &self.span, "create", %title, %group);

        async move {
            if title.trim().is_empty() || group.trim().is_empty() {
                return Err(SongLibError::Validation("song and group must not be empty".to_string()));
            }

            let details = self.lookup.lookup(title, group).await.map_err(|e| {
                if e.is_upstream() {
                    warn!("Lookup failed, nothing stored: {}", e);
                }
                e
            })?;
            let mut song = Song::new(title, group).with_details(details);
            song.id = self.store.create(&song).await?;

            info!("Created song {}: {} - {}", song.id, song.group, song.title);
            Ok::<Song, SongLibError>(song)
        }
        .instrument(span)
        .await
    }

    /// Replace all fields of an existing song. `Ok(false)` when the id is unknown.
    pub async fn update(&self, song: &Song) -> Result<bool> {
        let span = tracing::debug_span!(parent: &self.span, "update", id = song.id);

        async move {
            if song.id < 1 {
                return Err(SongLibError::Validation("id must be a positive integer".to_string()));
            }
            if song.title.trim().is_empty() || song.group.trim().is_empty() {
                return Err(SongLibError::Validation("song and group must not be empty".to_string()));
            }

            let found = self.store.update(song).await?;
            debug!("Update matched: {}", found);
            Ok::<bool, SongLibError>(found)
        }
        .instrument(span)
        .await
    }

    /// Delete a song by id. `Ok(false)` when the id is unknown.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let span = tracing::debug_span!(parent: &self.span, "delete", id);

        async move {
            let found = self.store.delete(id).await?;
            debug!("Delete matched: {}", found);
            Ok::<bool, SongLibError>(found)
        }
        .instrument(span)
        .await
    }

    /// Filtered, paginated collection read. With a verse selector set, each
    /// song's text is narrowed to that single verse.
    pub async fn list(&self, filter: &SongFilter) -> Result<Vec<Song>> {
        let span = tracing::debug_span!(parent: &self.span, "list");

        async move {
            let query = SongQuery::build(filter);
            debug!("Generated query: {}", query.sql);

            let mut songs = self.store.scan(&query).await?;

            if filter.verse > 0 {
                for song in &mut songs {
                    song.text = verses::verse_at(&song.text, filter.verse);
                }
            }

            Ok::<Vec<Song>, SongLibError>(songs)
        }
        .instrument(span)
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Song>> {
        self.store.get(id).await
    }

    /// A page of one song's verses.
    ///
    /// `None` means the song does not exist; `Some(vec![])` means it exists
    /// but the range holds no verses.
    pub async fn verses(&self, id: i64, range: VerseRange) -> Result<Option<Vec<String>>> {
        let span = tracing::debug_span!(parent: &self.span, "verses", id, limit = range.limit, offset = range.offset);

        async move {
            let verses = self.get(id).await?.map(|song| range.apply(&song.text));
            debug!("Verse page: {:?}", verses.as_ref().map(Vec::len));
            Ok::<Option<Vec<String>>, SongLibError>(verses)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Database;
    use crate::services::SqliteStore;
    use crate::core::models::SongDetails;
    use crate::error::{DatabaseError, NetworkError};

    const TEXT: &str = "a\n\nb\n\nc\n\nd\n\ne";

    struct FixedLookup;

    #[async_trait::async_trait]
    impl SongLookup for FixedLookup {
        async fn lookup(&self, title: &str, _group: &str) -> Result<SongDetails> {
            Ok(SongDetails {
                text: TEXT.to_string(),
                link: format!("https://example.com/{}", title),
                release_date: "16.07.2006".to_string(),
            })
        }
    }

    struct FailingLookup;

    #[async_trait::async_trait]
    impl SongLookup for FailingLookup {
        async fn lookup(&self, _title: &str, _group: &str) -> Result<SongDetails> {
            Err(NetworkError::Status { status: 503 }.into())
        }
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl SongStore for FailingStore {
        async fn create(&self, _song: &Song) -> Result<i64> {
            Err(DatabaseError::Migration("store offline".to_string()).into())
        }
        async fn update(&self, _song: &Song) -> Result<bool> {
            Err(DatabaseError::Migration("store offline".to_string()).into())
        }
        async fn delete(&self, _id: i64) -> Result<bool> {
            Err(DatabaseError::Migration("store offline".to_string()).into())
        }
        async fn scan(&self, _query: &SongQuery) -> Result<Vec<Song>> {
            Err(DatabaseError::Migration("store offline".to_string()).into())
        }
    }

    fn catalog_with(lookup: Arc<dyn SongLookup>) -> (Catalog, Arc<Database>) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let catalog = Catalog::new(Arc::new(SqliteStore::new(db.clone())), lookup, Span::none());
        (catalog, db)
    }

    #[tokio::test]
    async fn test_create_enriches_and_assigns_id() {
        let (catalog, db) = catalog_with(Arc::new(FixedLookup));

        let song = catalog.create("Supermassive Black Hole", "Muse").await.unwrap();

        assert!(song.id > 0);
        assert_eq!(song.title, "Supermassive Black Hole");
        assert_eq!(song.group, "Muse");
        assert_eq!(song.text, TEXT);
        assert_eq!(song.date, "16.07.2006");
        assert_eq!(db.get_song(song.id).unwrap(), Some(song));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_keys() {
        let (catalog, db) = catalog_with(Arc::new(FixedLookup));

        let err = catalog.create("", "Muse").await.unwrap_err();
        assert!(matches!(err, SongLibError::Validation(_)));
        assert_eq!(db.count_songs().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_persists_nothing() {
        let (catalog, db) = catalog_with(Arc::new(FailingLookup));

        let err = catalog.create("Song", "Group").await.unwrap_err();
        assert!(err.is_upstream());
        assert_eq!(db.count_songs().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let catalog = Catalog::new(Arc::new(FailingStore), Arc::new(FixedLookup), Span::none());

        let err = catalog.create("Song", "Group").await.unwrap_err();
        assert!(matches!(err, SongLibError::Database(_)));

        assert!(catalog.list(&SongFilter::default()).await.is_err());
        assert!(catalog.verses(1, VerseRange::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete_outcomes() {
        let (catalog, _db) = catalog_with(Arc::new(FixedLookup));
        let mut song = catalog.create("Song", "Group").await.unwrap();

        song.link = "https://example.com/new".to_string();
        assert!(catalog.update(&song).await.unwrap());
        assert_eq!(catalog.get(song.id).await.unwrap().unwrap().link, "https://example.com/new");

        let missing = Song { id: song.id + 100, ..song.clone() };
        assert!(!catalog.update(&missing).await.unwrap());

        let unset = Song { id: 0, ..song.clone() };
        assert!(matches!(catalog.update(&unset).await, Err(SongLibError::Validation(_))));

        let blank_title = Song { title: "  ".to_string(), ..song.clone() };
        assert!(matches!(catalog.update(&blank_title).await, Err(SongLibError::Validation(_))));
        let blank_group = Song { group: String::new(), ..song.clone() };
        assert!(matches!(catalog.update(&blank_group).await, Err(SongLibError::Validation(_))));
        assert_eq!(catalog.get(song.id).await.unwrap().unwrap().title, "Song");

        assert!(catalog.delete(song.id).await.unwrap());
        assert!(!catalog.delete(song.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_and_selects_verse() {
        let (catalog, _db) = catalog_with(Arc::new(FixedLookup));
        catalog.create("One", "X").await.unwrap();
        catalog.create("Two", "Y").await.unwrap();
        catalog.create("Three", "X").await.unwrap();

        let xs = catalog.list(&SongFilter::default().with_group("X")).await.unwrap();
        assert_eq!(xs.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), vec!["One", "Three"]);
        assert!(xs.iter().all(|s| s.text == TEXT));

        let filter = SongFilter { verse: 2, ..SongFilter::default() };
        let second = catalog.list(&filter).await.unwrap();
        assert_eq!(second.len(), 3);
        assert!(second.iter().all(|s| s.text == "b"));

        let filter = SongFilter { verse: 9, ..SongFilter::default() };
        assert!(catalog.list(&filter).await.unwrap().iter().all(|s| s.text.is_empty()));
    }

    #[tokio::test]
    async fn test_verses_absent_is_not_empty() {
        let (catalog, _db) = catalog_with(Arc::new(FixedLookup));
        let song = catalog.create("Song", "Group").await.unwrap();

        assert_eq!(
            catalog.verses(song.id, VerseRange::new(2, 3)).await.unwrap(),
            Some(vec!["d".to_string(), "e".to_string()])
        );
        assert_eq!(
            catalog.verses(song.id, VerseRange::new(1, 6)).await.unwrap(),
            Some(Vec::new())
        );
        assert_eq!(
            catalog.verses(song.id, VerseRange::new(6, 0)).await.unwrap().map(|v| v.len()),
            Some(5)
        );
        assert_eq!(catalog.verses(song.id + 1, VerseRange::default()).await.unwrap(), None);
    }
}
