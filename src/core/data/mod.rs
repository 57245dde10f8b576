//! Data layer modules
//!
//! This module contains all database-related functionality:
//! - `query`: read-query construction from a normalized filter
//! - `database`: SQLite record store for the song catalog

pub mod database;
pub mod query;

// Re-export main types
pub use database::Database;
pub use query::SongQuery;
