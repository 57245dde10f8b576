use clap::{Args, Subcommand};
use std::path::Path;

use crate::config::Config as AppConfig;
use crate::error::{ConfigError, Result, SongLibError};

/// Keys accepted by `config get` and `config set`, with their descriptions.
const KEYS: [(&str, &str); 8] = [
    ("database_path", "SQLite database file"),
    ("lookup_api_url", "Song details service base URL"),
    ("server_host", "HTTP API bind address"),
    ("server_port", "HTTP API port"),
    ("request_timeout_secs", "Request and lookup timeout in seconds"),
    ("log_level", "debug, info, warn or error"),
    ("use_stub_api", "Run the built-in stub details service"),
    ("stub_api_port", "Port for the stub details service"),
];

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// List all available configuration keys
    Keys,
}

fn unknown_key(key: &str) -> SongLibError {
    SongLibError::Validation(format!("Unknown configuration key: {}", key))
}

fn invalid_value(key: &str, value: &str) -> SongLibError {
    ConfigError::InvalidValue {
        field: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

fn get_value(config: &AppConfig, key: &str) -> Result<String> {
    let value = match key {
        "database_path" => config.database_path.display().to_string(),
        "lookup_api_url" => config.lookup_api_url.clone(),
        "server_host" => config.server_host.clone(),
        "server_port" => config.server_port.to_string(),
        "request_timeout_secs" => config.request_timeout_secs.to_string(),
        "log_level" => config.log_level.clone(),
        "use_stub_api" => config.use_stub_api.to_string(),
        "stub_api_port" => config.stub_api_port.to_string(),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "database_path" => config.database_path = value.into(),
        "lookup_api_url" => config.lookup_api_url = value.to_string(),
        "server_host" => config.server_host = value.to_string(),
        "server_port" => config.server_port = value.parse().map_err(|_| invalid_value(key, value))?,
        "request_timeout_secs" => {
            config.request_timeout_secs = value.parse().map_err(|_| invalid_value(key, value))?
        }
        "log_level" => config.log_level = value.to_lowercase(),
        "use_stub_api" => config.use_stub_api = value.parse().map_err(|_| invalid_value(key, value))?,
        "stub_api_port" => config.stub_api_port = value.parse().map_err(|_| invalid_value(key, value))?,
        _ => return Err(unknown_key(key)),
    }
    config.validate()
}

/// Apply `key = value` to the file at `path` as written, ignoring environment overrides.
fn set_in_file(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file_config = AppConfig::from_file_or_default(path)?;
    set_value(&mut file_config, key, value)?;
    file_config.save(path)
}

/// `config_file` is the file the running configuration was loaded from.
pub async fn execute(args: ConfigArgs, config: &AppConfig, config_file: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            for (key, _) in KEYS {
                println!("  {}: {}", key, get_value(config, key)?);
            }
        }

        ConfigCommands::Set { key, value } => {
            set_in_file(config_file, &key, &value)?;
            println!("Configuration updated: {} = {}", key, value);
            println!("Config file: {}", config_file.display());
        }

        ConfigCommands::Get { key } => {
            println!("{}", get_value(config, &key)?);
        }

        ConfigCommands::Path => {
            println!("{}", config_file.display());
        }

        ConfigCommands::Reset => {
            AppConfig::default().save(config_file)?;
            println!("Configuration reset to defaults");
            println!("Config file: {}", config_file.display());
        }

        ConfigCommands::Keys => {
            println!("Available configuration keys:");
            for (key, description) in KEYS {
                println!("  {:<22} - {}", key, description);
            }
            println!("\nUsage:");
            println!("  songlib config get <key>");
            println!("  songlib config set <key> <value>");
        }
    }

    Ok(())
}
