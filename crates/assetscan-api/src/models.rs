//! Wire models for the scanning service.
//!
//! Field names follow the service's camelCase JSON. Server-owned records
//! tolerate missing and `null` fields so that older or newer backends keep
//! decoding.

use crate::error::{ApiError, Result};
use assetscan_core::{JobId, ScanSettings, Schedule, TargetSpec};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle of a scan job as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Stored but never started
    Created,
    /// Waiting for its next recurring run
    Scheduled,
    /// Executing
    Running,
    /// Finished; individual targets may still have failed
    Completed,
    /// Aborted by an error
    Failed,
    /// Stopped by an operator
    Cancelled,
}

impl JobStatus {
    /// No further status changes will happen for this run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Scheduled => "SCHEDULED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST scan/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanJobRequest {
    /// Job name; must not be blank
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Targets, flattened into `ipAddresses` / `ipSegments`
    #[serde(flatten)]
    pub targets: TargetSpec,
    /// Whether the job repeats
    #[serde(default)]
    pub recurring: bool,
    /// Recurrence; must not be `none` when `recurring`
    #[serde(default)]
    pub schedule: Schedule,
    /// Feature toggles
    #[serde(default)]
    pub settings: ScanSettings,
}

impl ScanJobRequest {
    /// Create a one-off request with default settings.
    pub fn new(name: impl Into<String>, targets: TargetSpec) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            targets,
            recurring: false,
            schedule: Schedule::None,
            settings: ScanSettings::default(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make the job recurring on the given schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.recurring = schedule != Schedule::None;
        self.schedule = schedule;
        self
    }

    /// Replace the feature toggles.
    #[must_use]
    pub fn with_settings(mut self, settings: ScanSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Check the request before it is sent.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] for a blank name, an empty target
    /// set, or a recurring job without a schedule.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("scan name is required".to_string()));
        }
        if self.targets.is_empty() {
            return Err(ApiError::InvalidRequest(
                "at least one IP address or IP segment is required".to_string(),
            ));
        }
        if self.recurring && self.schedule == Schedule::None {
            return Err(ApiError::InvalidRequest(
                "a schedule is required for recurring scans".to_string(),
            ));
        }
        Ok(())
    }
}

/// A scan job as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanJob {
    /// Service-assigned id
    pub id: JobId,
    /// Operator-chosen name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Targets in the current run
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_targets: u32,
    /// Targets processed so far
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_targets: u32,
    /// Targets that answered
    #[serde(default, deserialize_with = "null_as_default")]
    pub successful_targets: u32,
    /// Targets that could not be scanned
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed_targets: u32,
    /// Creation time (service local time)
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Start of the latest run
    #[serde(default)]
    pub last_run_at: Option<NaiveDateTime>,
    /// Next recurring run
    #[serde(default)]
    pub next_run_at: Option<NaiveDateTime>,
    /// Individual addresses as submitted
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_addresses: Vec<String>,
    /// Segments as submitted
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_segments: Vec<String>,
    /// Whether the job repeats
    #[serde(default, deserialize_with = "null_as_default")]
    pub recurring: bool,
    /// Recurrence as stored by the service (may be a cron expression)
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: String,
}

impl ScanJob {
    /// Completion percentage for this snapshot alone, `None` when the job
    /// has no targets yet.
    #[must_use]
    pub fn progress(&self) -> Option<u8> {
        if self.total_targets == 0 {
            return None;
        }
        let percent = u64::from(self.completed_targets) * 100 / u64::from(self.total_targets);
        Some(u8::try_from(percent.min(100)).unwrap_or(100))
    }

    /// Whether the job reached a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Outcome of scanning one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Service-assigned id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Job that produced the result
    #[serde(default, deserialize_with = "null_as_default")]
    pub scan_job_id: String,
    /// Scanned address
    pub ip_address: String,
    /// Resolved hostname
    #[serde(default)]
    pub hostname: Option<String>,
    /// Whether the target answered
    #[serde(default, deserialize_with = "null_as_default")]
    pub successful: bool,
    /// Failure reason for unsuccessful targets
    #[serde(default)]
    pub error_message: Option<String>,
    /// When the target was scanned
    #[serde(default)]
    pub scan_time: Option<NaiveDateTime>,
    /// Inventory entry created or updated
    #[serde(default)]
    pub asset_id: Option<String>,
}

/// An inventory entry discovered by scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Service-assigned id
    pub id: String,
    /// Scanned address
    pub ip_address: String,
    /// Resolved hostname
    #[serde(default)]
    pub hostname: Option<String>,
    /// Classification, e.g. `SERVER`
    #[serde(default)]
    pub asset_type: Option<String>,
    /// Detected operating system
    #[serde(default)]
    pub operating_system: Option<String>,
    /// Detected OS version
    #[serde(default)]
    pub os_version: Option<String>,
    /// Hardware address
    #[serde(default)]
    pub mac_address: Option<String>,
    /// Hardware vendor
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Hardware model
    #[serde(default)]
    pub model: Option<String>,
    /// Collector-specific details
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_info: Map<String, Value>,
    /// Reachable at the last scan
    #[serde(default, deserialize_with = "null_as_default")]
    pub online: bool,
    /// First time a scan saw the asset
    #[serde(default)]
    pub first_discovered: Option<NaiveDateTime>,
    /// Latest time a scan saw the asset
    #[serde(default)]
    pub last_seen: Option<NaiveDateTime>,
}

/// Body of `POST auth/signin`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Account name
    pub username: String,
    /// Plain password, sent over the configured transport
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST auth/signup`.
#[derive(Clone, Serialize)]
pub struct SignupRequest {
    /// Account name
    pub username: String,
    /// Contact address
    pub email: String,
    /// Plain password, sent over the configured transport
    pub password: String,
    /// Requested roles; the service assigns `user` when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,
}

impl SignupRequest {
    /// Create a request without explicit roles.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role: Vec::new(),
        }
    }

    /// Check required fields before sending.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::InvalidRequest(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Plain `{ "message": ... }` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}
