//! Assetscan Core - Foundation crate for the assetscan client.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other assetscan crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Scan scope and settings types (`TargetSpec`, `ScanSettings`, `Schedule`, `JobId`)
//!
//! # Example
//!
//! ```rust
//! use assetscan_core::{AppConfig, ScanSettings};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.tracking.poll_interval_ms, 2000);
//!
//! let settings = ScanSettings::default();
//! assert_eq!(settings.enabled_count(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, ScanConfig, SessionConfig, TrackingConfig};
pub use error::{AssetScanError, ConfigError, ConfigResult, Result};
pub use types::{JobId, ScanSetting, ScanSettings, Schedule, TargetSpec, DEFAULT_SETTINGS};
