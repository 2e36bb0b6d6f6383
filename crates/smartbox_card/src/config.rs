//! Configuration file parsing and structures.
//!
//! The preview host reads a single TOML file:
//! - `[logging]`: level and per-target overrides
//! - `[card]`: the card configuration pushed into the card
//! - `[server]`: where the preview API listens
//! - `[dashboard]`: resource mode and the dashboard's saved resources
//! - `[[remotes]]`: remote entities the host exposes

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Targets;

use crate::card::CardConfig;
use crate::remote::SmartboxRemote;
use crate::resources::DashboardMode;
use crate::resources::Resource;

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub card: CardConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub remotes: Vec<SmartboxRemote>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,

    /// Per-target levels, e.g. `tower_http = "debug"`
    #[serde(default)]
    pub overrides: HashMap<String, LogLevel>,
}

impl LoggingConfig {
    /// Filter applying `level` everywhere except the overridden targets.
    pub fn targets(&self) -> Targets {
        Targets::new()
            .with_default(LevelFilter::from(self.level))
            .with_targets(
                self.overrides
                    .iter()
                    .map(|(target, level)| (target.clone(), LevelFilter::from(*level))),
            )
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8565
}

/// Preview API listener
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub mode: DashboardMode,

    /// Resources the dashboard already has saved
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::DeviceKind;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.card.entity, None);
        assert_eq!(config.server.listen, "127.0.0.1");
        assert_eq!(config.server.port, 8565);
        assert_eq!(config.dashboard.mode, DashboardMode::Storage);
        assert!(config.dashboard.resources.is_empty());
        assert!(config.remotes.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [logging]
            level = "debug"

            [logging.overrides]
            tower_http = "warn"

            [card]
            type = "custom:neo-smartbox-remote-card"
            entity = "remote.living_room"

            [server]
            listen = "0.0.0.0"
            port = 9000

            [dashboard]
            mode = "yaml"

            [[dashboard.resources]]
            url = "/local/other-card.js"
            res_type = "module"

            [[remotes]]
            entity_id = "remote.living_room"
            device_id = "stb-0001"
            name = "Living Room"
            kind = "stb"

            [[remotes]]
            entity_id = "remote.bedroom"
            device_id = "tv-0002"
            name = "Bedroom"
            kind = "dt_tv"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.overrides["tower_http"], LogLevel::Warn);
        assert_eq!(config.card.entity.as_deref(), Some("remote.living_room"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.dashboard.mode, DashboardMode::Yaml);
        assert_eq!(config.dashboard.resources[0].url, "/local/other-card.js");
        assert_eq!(config.remotes.len(), 2);
        assert_eq!(config.remotes[1].kind, DeviceKind::SmartTv);
    }

    #[test]
    fn test_invalid_log_level() {
        let err = Config::from_toml("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/smartbox-card.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Error);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
    }
}
