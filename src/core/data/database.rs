//! SQLite record store for the song catalog
//!
//! Every public operation is a single statement, so atomicity comes from
//! SQLite itself. All methods are blocking; async callers go through
//! `SqliteStore`, which runs them on the blocking pool.

use rusqlite::{named_params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::core::data::query::SongQuery;
use crate::core::filter::SongFilter;
use crate::core::models::Song;
use crate::error::{DatabaseError, Result, SongLibError};

const CURRENT_DB_VERSION: u32 = 1;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        info!("Opening database at: {}", db_path.display());

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_| DatabaseError::Directory {
                path: parent.to_path_buf(),
            })?;
        }

        let conn = Connection::open(db_path).map_err(DatabaseError::Connection)?;

        // Enable WAL mode for better concurrent access
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(DatabaseError::Connection)?;

        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Connection)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        let existing_user_version: u32 =
            conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if existing_user_version < CURRENT_DB_VERSION {
            Self::upgrade_database(&mut conn, existing_user_version)?;
        }

        Ok(Database { conn: Mutex::new(conn) })
    }

    fn upgrade_database(conn: &mut Connection, existing_version: u32) -> Result<()> {
        debug!("Upgrading database from version {} to {}", existing_version, CURRENT_DB_VERSION);

        if existing_version == 0 {
            let tx = conn.transaction()?;

            tx.pragma_update(None, "user_version", CURRENT_DB_VERSION)?;

            tx.execute_batch(r#"
                CREATE TABLE songs (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL CHECK (title <> ''),
                    "group" TEXT NOT NULL CHECK ("group" <> ''),
                    text TEXT NOT NULL DEFAULT '',
                    link TEXT NOT NULL DEFAULT '',
                    date TEXT NOT NULL DEFAULT '',
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
                );

                CREATE INDEX idx_songs_title ON songs(title);
                CREATE INDEX idx_songs_group ON songs("group");
                CREATE INDEX idx_songs_date ON songs(date);
            "#)
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

            tx.commit()?;
        }

        info!("Database upgraded successfully");
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SongLibError::Internal(anyhow::anyhow!("database connection lock poisoned")))
    }

    /// Insert a song and return the id SQLite assigned to it.
    pub fn insert_song(&self, song: &Song) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO songs (title, "group", text, link, date)
            VALUES (:title, :group, :text, :link, :date)
            "#,
            named_params! {
                ":title": song.title,
                ":group": song.group,
                ":text": song.text,
                ":link": song.link,
                ":date": song.date,
            },
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted song {} - {} as id {}", song.group, song.title, id);
        Ok(id)
    }

    /// Replace every field of the song with `song.id`. Returns false when no
    /// row has that id.
    pub fn update_song(&self, song: &Song) -> Result<bool> {
        let rows = self.conn()?.execute(
            r#"
            UPDATE songs
            SET title = :title, "group" = :group, text = :text, link = :link, date = :date,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = :id
            "#,
            named_params! {
                ":title": song.title,
                ":group": song.group,
                ":text": song.text,
                ":link": song.link,
                ":date": song.date,
                ":id": song.id,
            },
        )?;

        debug!("Updated song {}: {} row(s)", song.id, rows);
        Ok(rows > 0)
    }

    /// Physically remove a song. Returns false when no row has that id.
    pub fn delete_song(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()?
            .execute("DELETE FROM songs WHERE id = :id", named_params! { ":id": id })?;

        debug!("Deleted song {}: {} row(s)", id, rows);
        Ok(rows > 0)
    }

    /// Run a built read query, in the store's natural row order.
    pub fn scan(&self, query: &SongQuery) -> Result<Vec<Song>> {
        debug!("Scanning songs (filtered: {}): {}", query.has_where_clause(), query.sql);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&query.sql)?;
        let songs = stmt
            .query_map(query.named_params().as_slice(), song_from_row)?
            .collect::<std::result::Result<Vec<Song>, _>>()?;

        debug!("Scan returned {} song(s)", songs.len());
        Ok(songs)
    }

    pub fn get_song(&self, id: i64) -> Result<Option<Song>> {
        let query = SongQuery::build(&SongFilter::by_id(id));
        Ok(self.scan(&query)?.into_iter().next())
    }

    pub fn count_songs(&self) -> Result<i64> {
        let count = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        group: row.get(2)?,
        text: row.get(3)?,
        link: row.get(4)?,
        date: row.get(5)?,
    })
}
