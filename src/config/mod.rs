//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::DEFAULT_DETAIL_ROWS;
use crate::models::RankWindow;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Dashboard defaults and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows shown in the deck detail sample
    #[serde(default = "default_detail_max_rows")]
    pub detail_max_rows: usize,

    /// Last position selectable in the rank window
    #[serde(default = "default_max_rank")]
    pub max_rank: u32,

    /// Ranking classes offered for selection
    #[serde(default = "default_class_options")]
    pub class_options: Vec<u32>,

    /// Initially selected ranking classes
    #[serde(default = "default_classes")]
    pub default_classes: Vec<u32>,

    /// Years skipped after the first year for the initial year range
    #[serde(default = "default_year_offset")]
    pub default_year_offset: u32,

    /// Initial rank window
    #[serde(default)]
    pub default_window: RankWindow,
}

fn default_detail_max_rows() -> usize {
    DEFAULT_DETAIL_ROWS
}

fn default_max_rank() -> u32 {
    200
}

fn default_class_options() -> Vec<u32> {
    vec![1, 2, 3, 4]
}

fn default_classes() -> Vec<u32> {
    vec![1, 2]
}

fn default_year_offset() -> u32 {
    16
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            detail_max_rows: default_detail_max_rows(),
            max_rank: default_max_rank(),
            default_window: RankWindow::default(),
            class_options: default_class_options(),
            default_classes: default_classes(),
            default_year_offset: default_year_offset(),
        }
    }
}

impl DashboardConfig {
    /// Clamp a requested window's end to `max_rank`.
    pub fn clamp_window(&self, window: RankWindow) -> RankWindow {
        RankWindow {
            start: window.start,
            end: window.end.min(self.max_rank),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/data_decks.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
            dashboard: DashboardConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dashboard = &self.dashboard;

        if dashboard.detail_max_rows == 0 {
            return Err(ConfigError::ValidationError(
                "Detail rows must be greater than 0".to_string(),
            ));
        }

        if dashboard.max_rank == 0 {
            return Err(ConfigError::ValidationError(
                "Max rank must be greater than 0".to_string(),
            ));
        }

        dashboard
            .default_window
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if dashboard.default_window.end > dashboard.max_rank {
            return Err(ConfigError::ValidationError(format!(
                "Default window end {} exceeds max rank {}",
                dashboard.default_window.end, dashboard.max_rank
            )));
        }

        if dashboard.class_options.contains(&0) || dashboard.default_classes.contains(&0) {
            return Err(ConfigError::ValidationError(
                "Ranking classes start at 1".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
