//! Error handling for the songlib application
//!
//! This module provides a hierarchical error system. Store and network
//! failures keep their source errors so callers can log the full chain,
//! while client-input problems (`InvalidFilter`, `Validation`) carry enough
//! context to be reported back verbatim.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongLibError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{field} must be int, got '{value}'")]
    InvalidFilter { field: String, value: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SongLibError {
    pub fn invalid_filter(field: &str, value: &str) -> Self {
        SongLibError::InvalidFilter {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Failures of a collaborator (record store or enrichment service)
    /// rather than of the caller's input.
    pub fn is_upstream(&self) -> bool {
        matches!(self, SongLibError::Database(_) | SongLibError::Network(_))
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SongLibError::InvalidFilter { .. } | SongLibError::Validation(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Constraint violated: {0}")]
    Constraint(#[source] rusqlite::Error),

    #[error("Database directory could not be created: {path}")]
    Directory { path: PathBuf },

    #[error("Database corruption detected")]
    Corruption,
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lookup service returned {status}")]
    Status { status: u16 },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Invalid lookup URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Config could not be written: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, SongLibError>;

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi::Error { code: ffi::ErrorCode::DatabaseCorrupt, .. }, _) => {
                DatabaseError::Corruption
            }
            rusqlite::Error::SqliteFailure(ffi::Error { code: ffi::ErrorCode::ConstraintViolation, .. }, _) => {
                DatabaseError::Constraint(err)
            }
            _ => DatabaseError::Query(err),
        }
    }
}

use rusqlite::ffi;

impl From<rusqlite::Error> for SongLibError {
    fn from(err: rusqlite::Error) -> Self {
        SongLibError::Database(err.into())
    }
}

impl From<reqwest::Error> for SongLibError {
    fn from(err: reqwest::Error) -> Self {
        SongLibError::Network(NetworkError::Http(err))
    }
}

impl From<std::io::Error> for SongLibError {
    fn from(err: std::io::Error) -> Self {
        SongLibError::Internal(err.into())
    }
}

impl From<toml::de::Error> for SongLibError {
    fn from(err: toml::de::Error) -> Self {
        SongLibError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<tokio::task::JoinError> for SongLibError {
    fn from(err: tokio::task::JoinError) -> Self {
        SongLibError::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_names_field() {
        let err = SongLibError::invalid_filter("limit", "one");
        assert_eq!(err.to_string(), "limit must be int, got 'one'");
        assert!(err.is_client_error());
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_upstream_classification() {
        let err: SongLibError = NetworkError::Status { status: 503 }.into();
        assert!(err.is_upstream());

        let err: SongLibError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(err.is_upstream());
        assert!(matches!(err, SongLibError::Database(DatabaseError::Query(_))));
    }
}
