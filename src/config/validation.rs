use std::path::Path;
use url::Url;
use crate::error::{Result, SongLibError};

pub const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an http(s) URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            SongLibError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SongLibError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(SongLibError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate database file extension
    pub fn validate_db_path(path: &Path) -> Result<()> {
        if let Some(ext) = path.extension() {
            if ext != "db" && ext != "sqlite" && ext != "sqlite3" {
                return Err(SongLibError::Validation(format!(
                    "Database file should have .db, .sqlite, or .sqlite3 extension, got: {}",
                    path.display()
                )));
            }
        } else {
            return Err(SongLibError::Validation(format!(
                "Database file should have an extension (.db, .sqlite, .sqlite3), got: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_log_level(level: &str) -> Result<()> {
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(SongLibError::Validation(format!(
                "Log level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                level
            )));
        }
        Ok(())
    }
}
