//! Configuration module
//!
//! Reads TOML configuration (`BOOKING_CONFIG` env var or
//! `~/.config/tripnest-booking/config.toml`). Every section falls back to
//! defaults, so a missing or partial file still yields a runnable config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::application::{ReservationConfig, SweeperConfig};
use crate::shared::retry::RetryConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub booking: BookingConfig,
    pub sweeper: SweeperSection,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// Register a handful of demo rooms at startup (local development)
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
            seed_demo_data: false,
        }
    }
}

/// Reservation commit configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Bound on waiting for room locks before failing retryable
    pub lock_timeout_ms: u64,
    /// Attempts for transient store failures during check-or-commit
    pub retry_max_attempts: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: 5_000,
            retry_max_attempts: 3,
        }
    }
}

/// Occupancy sweeper configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweeperSection {
    /// Seconds between occupancy reconciliation runs
    pub check_interval_secs: u64,
}

impl Default for SweeperSection {
    fn default() -> Self {
        Self {
            check_interval_secs: 86_400,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn reservation_config(&self) -> ReservationConfig {
        ReservationConfig {
            lock_timeout: Duration::from_millis(self.booking.lock_timeout_ms),
            retry: RetryConfig {
                max_attempts: self.booking.retry_max_attempts,
                ..RetryConfig::default()
            },
        }
    }

    pub fn sweeper_config(&self) -> SweeperConfig {
        SweeperConfig {
            check_interval_secs: self.sweeper.check_interval_secs,
        }
    }
}

/// Default config file location (`~/.config/tripnest-booking/config.toml`)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripnest-booking")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
