//! Shared types used across the assetscan client.
//!
//! This module defines the operator-facing description of a scan (targets,
//! feature toggles, recurrence) and the identifiers used to address jobs on
//! the remote service.

use crate::error::AssetScanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Newtype for scan job identifiers issued by the scanning service.
///
/// The service owns the format; the client only guarantees the id is safe to
/// embed as a single URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Create a new `JobId` from a string.
    ///
    /// # Errors
    /// Returns error if the id is empty or contains characters that would
    /// escape its path segment.
    pub fn new(id: impl Into<String>) -> Result<Self, AssetScanError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), AssetScanError> {
        if id.is_empty() {
            return Err(AssetScanError::Validation(
                "invalid job ID: must not be empty".to_string(),
            ));
        }

        if id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '%'))
        {
            return Err(AssetScanError::Validation(format!(
                "invalid job ID: must be a single path segment, got '{id}'"
            )));
        }

        Ok(())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = AssetScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

/// The operator-supplied scan scope.
///
/// Entries keep the order the operator gave them and are never deduplicated.
/// Segments are CIDR blocks or dash ranges kept as raw strings; expanding them
/// into individual hosts is the scanning service's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Individual addresses
    #[serde(rename = "ipAddresses", default)]
    pub addresses: Vec<String>,
    /// CIDR blocks and dash ranges
    #[serde(rename = "ipSegments", default)]
    pub segments: Vec<String>,
}

impl TargetSpec {
    /// True when neither addresses nor segments were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.segments.is_empty()
    }
}

/// A single scan feature toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSetting {
    /// Human label, unique within a settings list
    pub name: String,
    /// Whether the feature is requested
    pub enabled: bool,
}

impl ScanSetting {
    /// Create a new setting.
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

/// Ordered list of scan feature toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanSettings(Vec<ScanSetting>);

/// Feature toggles offered by default, in display order.
pub const DEFAULT_SETTINGS: [(&str, bool); 5] = [
    ("Ping scan", true),
    ("OS detection", true),
    ("Service detection", true),
    ("Hardware info collection", true),
    // Heaviest collector, off unless asked for
    ("Software inventory", false),
];

impl ScanSettings {
    /// Create settings from an explicit list.
    #[must_use]
    pub fn new(settings: Vec<ScanSetting>) -> Self {
        Self(settings)
    }

    /// Number of enabled settings.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.0.iter().filter(|s| s.enabled).count()
    }

    /// Names of the enabled settings, in order.
    pub fn enabled_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter(|s| s.enabled).map(|s| s.name.as_str())
    }

    /// Toggle a setting by name (case-insensitive).
    ///
    /// Returns `false` if no setting with that name exists.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self
            .0
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(setting) => {
                setting.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Iterate over all settings.
    pub fn iter(&self) -> impl Iterator<Item = &ScanSetting> {
        self.0.iter()
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self(
            DEFAULT_SETTINGS
                .iter()
                .map(|(name, enabled)| ScanSetting::new(*name, *enabled))
                .collect(),
        )
    }
}

/// Recurrence of a scan job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    /// One-off scan
    #[default]
    #[serde(rename = "")]
    None,
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every month
    Monthly,
}

impl Schedule {
    /// Wire value of the schedule.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for Schedule {
    type Err = AssetScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(AssetScanError::Validation(format!(
                "unknown schedule '{other}': expected daily, weekly or monthly"
            ))),
        }
    }
}
