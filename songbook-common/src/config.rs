//! Configuration loading and resolution
//!
//! Every setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Arguments and environment variables are both parsed by clap in the binary
//! and arrive here already merged as [`ConfigOverrides`].

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://songbook.db?mode=rwc";
pub const DEFAULT_DETAIL_TIMEOUT_SECS: u64 = 10;

/// Operating mode of the service
///
/// Development is permissive: a failed song-detail lookup falls back to
/// defaults. Production is strict: the same failure aborts song creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl RunMode {
    /// True when enrichment failures must abort creation
    pub fn is_strict(&self) -> bool {
        matches!(self, RunMode::Production)
    }

    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            RunMode::Development => "songbook_api=debug,songbook_common=debug,tower_http=debug",
            RunMode::Production => "songbook_api=info,songbook_common=info,tower_http=info",
        }
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(RunMode::Development),
            "production" | "prod" => Ok(RunMode::Production),
            other => Err(Error::Config(format!(
                "Unknown mode '{}' (expected 'development' or 'production')",
                other
            ))),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Development => write!(f, "development"),
            RunMode::Production => write!(f, "production"),
        }
    }
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub http_port: Option<u16>,
    pub bind_host: Option<String>,
    pub database_url: Option<String>,
    pub song_detail_api: Option<String>,
    pub mode: Option<String>,
    pub detail_timeout_secs: Option<u64>,
}

/// TOML config file contents
///
/// All fields are optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub http_port: Option<u16>,
    pub bind_host: Option<String>,
    pub database_url: Option<String>,
    pub song_detail_api: Option<String>,
    pub mode: Option<String>,
    pub detail_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Platform config file location (`~/.config/songbook/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songbook").join("config.toml"))
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub http_port: u16,
    pub bind_host: String,
    pub database_url: String,
    /// Base URL of the song-detail lookup API
    pub song_detail_api: String,
    pub mode: RunMode,
    /// Upper bound on a single song-detail request
    pub detail_timeout: Duration,
}

impl ServiceConfig {
    /// Load configuration, reading the TOML file if one is available
    ///
    /// An explicitly requested file must exist. The platform default file is
    /// optional and skipped with a debug message when missing.
    pub fn load(overrides: ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(TomlConfig::load(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => match TomlConfig::load(&path) {
                    Ok(cfg) => Some(cfg),
                    Err(e) => {
                        warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                        None
                    }
                },
                Some(path) => {
                    debug!("No config file at {}", path.display());
                    None
                }
                None => None,
            },
        };

        Self::resolve(overrides, file)
    }

    /// Merge overrides, file values and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let song_detail_api = overrides
            .song_detail_api
            .or(file.song_detail_api)
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Config("song_detail_api is required (SONG_DETAIL_API)".to_string()))?;

        let mode = match overrides.mode.or(file.mode) {
            Some(raw) => raw.parse()?,
            None => RunMode::default(),
        };

        let timeout_secs = overrides
            .detail_timeout_secs
            .or(file.detail_timeout_secs)
            .unwrap_or(DEFAULT_DETAIL_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("detail_timeout_secs must be greater than 0".to_string()));
        }

        Ok(Self {
            http_port: overrides.http_port.or(file.http_port).unwrap_or(DEFAULT_HTTP_PORT),
            bind_host: overrides
                .bind_host
                .or(file.bind_host)
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            database_url: overrides
                .database_url
                .or(file.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            song_detail_api,
            mode,
            detail_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_api() -> ConfigOverrides {
        ConfigOverrides {
            song_detail_api: Some("http://detail.local".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = ServiceConfig::resolve(with_api(), None).unwrap();
        assert_eq!(cfg.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(cfg.bind_host, DEFAULT_BIND_HOST);
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.mode, RunMode::Development);
        assert_eq!(cfg.detail_timeout, Duration::from_secs(DEFAULT_DETAIL_TIMEOUT_SECS));
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_detail_api_is_error() {
        let err = ServiceConfig::resolve(ConfigOverrides::default(), None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = TomlConfig {
            http_port: Some(9000),
            mode: Some("production".to_string()),
            song_detail_api: Some("http://from-file".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            http_port: Some(7000),
            ..with_api()
        };

        let cfg = ServiceConfig::resolve(overrides, Some(file)).unwrap();
        assert_eq!(cfg.http_port, 7000);
        assert_eq!(cfg.song_detail_api, "http://detail.local");
        // Not overridden, so the file value wins over the default
        assert_eq!(cfg.mode, RunMode::Production);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let overrides = ConfigOverrides {
            song_detail_api: Some("http://detail.local/api/".to_string()),
            ..Default::default()
        };
        let cfg = ServiceConfig::resolve(overrides, None).unwrap();
        assert_eq!(cfg.song_detail_api, "http://detail.local/api");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let overrides = ConfigOverrides {
            detail_timeout_secs: Some(0),
            ..with_api()
        };
        assert!(ServiceConfig::resolve(overrides, None).is_err());
    }

    #[test]
    fn test_run_mode_parsing() {
        assert_eq!("development".parse::<RunMode>().unwrap(), RunMode::Development);
        assert_eq!("PROD".parse::<RunMode>().unwrap(), RunMode::Production);
        assert!("staging".parse::<RunMode>().is_err());
        assert!(RunMode::Production.is_strict());
        assert!(!RunMode::Development.is_strict());
    }

    #[test]
    fn test_toml_parse() {
        let cfg = TomlConfig::parse(
            r#"
            http_port = 8181
            song_detail_api = "http://detail.local"
            mode = "dev"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.http_port, Some(8181));
        assert_eq!(cfg.mode.as_deref(), Some("dev"));
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn test_toml_parse_error() {
        let err = TomlConfig::parse("http_port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::ConfigFile(_)));
    }
}
