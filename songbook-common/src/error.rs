//! Error type shared by the songbook crates

use thiserror::Error;

/// Result alias used throughout songbook-common
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Storage failure (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading a config file or creating the database directory failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML config file
    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
