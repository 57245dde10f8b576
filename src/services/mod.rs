//! Service layer for dependency injection
//!
//! - `SongStore`: record store seam, and `SqliteStore`, its SQLite implementation
//! - `SongLookup`: enrichment seam, implemented by `LookupClient`
//! - `ServiceFactory`: builds the concrete services from `Config`

pub mod database;
pub mod factory;
pub mod lookup;

pub use database::{SongStore, SqliteStore};
pub use factory::ServiceFactory;
pub use lookup::SongLookup;
