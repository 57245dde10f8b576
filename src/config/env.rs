use std::env;
use std::path::PathBuf;
use crate::error::{Result, SongLibError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const DATABASE_PATH: &'static str = "SONGLIB_DATABASE_PATH";
    pub const LOOKUP_API_URL: &'static str = "SONGLIB_LOOKUP_API_URL";
    pub const SERVER_HOST: &'static str = "SONGLIB_SERVER_HOST";
    pub const SERVER_PORT: &'static str = "SONGLIB_SERVER_PORT";
    pub const REQUEST_TIMEOUT_SECS: &'static str = "SONGLIB_REQUEST_TIMEOUT_SECS";
    pub const LOG_LEVEL: &'static str = "SONGLIB_LOG_LEVEL";
    pub const USE_STUB_API: &'static str = "SONGLIB_USE_STUB_API";
    pub const STUB_API_PORT: &'static str = "SONGLIB_STUB_API_PORT";

    // Special environment variables
    pub const DOCKER: &'static str = "DOCKER";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string, treating blank values as unset
    pub fn parse_string(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(SongLibError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name)?.map(PathBuf::from))
    }

    /// Parse environment variable as boolean with validation
    pub fn parse_bool(var_name: &str) -> Result<Option<bool>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            match value_str.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(SongLibError::Validation(format!(
                    "Invalid boolean value in {}: '{}'. Use: true/false, 1/0, yes/no, on/off",
                    var_name, value_str
                )))
            }
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                SongLibError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(SongLibError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    pub fn parse_port(var_name: &str) -> Result<Option<u16>> {
        Ok(Self::parse_u64(var_name, 1, u16::MAX as u64)?.map(|port| port as u16))
    }
}
