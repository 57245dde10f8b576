use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use tracing::warn;

use crate::error::{ConfigError, Result, SongLibError};

pub mod env;
pub mod validation;

use self::env::{EnvParser, EnvVars};
use self::validation::ConfigValidator;

fn default_request_timeout_secs() -> u64 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stub_api_port() -> u16 {
    8081
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database file path
    pub database_path: PathBuf,

    /// Base URL of the song details service
    pub lookup_api_url: String,

    /// Address the HTTP API binds to
    pub server_host: String,

    /// Port the HTTP API listens on
    pub server_port: u16,

    /// Per-request timeout for the HTTP API and outbound lookups (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level: debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Run the built-in stub details service next to the API
    #[serde(default)]
    pub use_stub_api: bool,

    /// Port for the built-in stub details service
    #[serde(default = "default_stub_api_port")]
    pub stub_api_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        // Use /data only when explicitly running under Docker (DOCKER env var)
        let default_data_path = if std::env::var(EnvVars::DOCKER).is_ok() {
            PathBuf::from("/data")
        } else {
            match ProjectDirs::from("net", "songlib", "songlib") {
                Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
                None => {
                    warn!("ProjectDirs unavailable; falling back to current directory for data path");
                    PathBuf::from(".")
                }
            }
        };

        Self {
            database_path: default_data_path.join("songlib.db"),
            lookup_api_url: "http://localhost:8081".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            use_stub_api: false,
            stub_api_port: default_stub_api_port(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for Docker and development)
        dotenvy::dotenv().ok();

        let config_file = Self::resolve_path(config_path)?;
        if config_path.is_some() && !config_file.exists() {
            return Err(ConfigError::FileNotFound { path: config_file }.into());
        }

        let file_config = Self::from_file_or_default(&config_file)?;

        // Save config file if it doesn't exist, before any env override lands in it
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Err(e) = file_config.save(&config_file) {
                warn!("Could not write default config to {}: {}", config_file.display(), e);
            }
        }

        // Override with environment variables (highest priority)
        let mut config = file_config;
        config.load_from_env()?;
        config.validate()?;

        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }

    /// The file `load` reads: `config_path` when given, else the platform default.
    pub fn resolve_path(config_path: Option<&str>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// File contents only, without environment overrides. Defaults when the file is absent.
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(db_path) = EnvParser::parse_path(EnvVars::DATABASE_PATH)? {
            self.database_path = db_path;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::LOOKUP_API_URL)? {
            self.lookup_api_url = url;
        }

        if let Some(host) = EnvParser::parse_string(EnvVars::SERVER_HOST)? {
            self.server_host = host;
        }

        if let Some(port) = EnvParser::parse_port(EnvVars::SERVER_PORT)? {
            self.server_port = port;
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECS, 1, 300)? {
            self.request_timeout_secs = timeout;
        }

        if let Some(level) = EnvParser::parse_string(EnvVars::LOG_LEVEL)? {
            self.log_level = level.to_lowercase();
        }

        if let Some(use_stub) = EnvParser::parse_bool(EnvVars::USE_STUB_API)? {
            self.use_stub_api = use_stub;
        }

        if let Some(port) = EnvParser::parse_port(EnvVars::STUB_API_PORT)? {
            self.stub_api_port = port;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.lookup_api_url, "lookup API")?;
        ConfigValidator::validate_db_path(&self.database_path)?;
        ConfigValidator::validate_range(self.server_port, 1, u16::MAX, "server_port")?;
        ConfigValidator::validate_range(self.request_timeout_secs, 1, 300, "request_timeout_secs")?;
        ConfigValidator::validate_log_level(&self.log_level)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "songlib", "songlib").ok_or_else(|| {
            SongLibError::Validation("Failed to determine project directories".to_string())
        })?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn server_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse::<SocketAddr>()
            .map_err(|_| {
                SongLibError::Config(ConfigError::InvalidValue {
                    field: "server_host".to_string(),
                    value: self.server_host.clone(),
                })
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
