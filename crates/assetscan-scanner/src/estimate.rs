//! Duration and resource estimate for a scan, shown before submission.
//!
//! The numbers are a rough operator aid. Durations are computed in whole
//! tenths of a second so the label thresholds are exact.

use assetscan_core::{ScanSettings, TargetSpec};
use serde::Serialize;
use std::fmt;

/// Targets assumed for a `/24` segment.
const SLASH_24_TARGETS: u64 = 254;

/// Targets assumed for a `/16` segment (coarse placeholder).
const SLASH_16_TARGETS: u64 = 100;

/// Targets assumed for a range whose bounds do not parse.
const UNPARSED_RANGE_TARGETS: u64 = 10;

/// Base time per target, in tenths of a second.
const BASE_TENTHS_PER_TARGET: u64 = 20;

/// Per-target overhead multiplier: `1 + 0.2 * enabled`, scaled by ten.
const MULTIPLIER_BASE: u64 = 10;
const MULTIPLIER_PER_SETTING: u64 = 2;

const TENTHS_PER_MINUTE: u64 = 600;
const TENTHS_PER_HOUR: u64 = 36_000;

/// Expected load on the scanning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ResourceLevel {
    /// Two or fewer features enabled
    Low,
    /// Three or four features enabled
    Medium,
    /// Five or more features enabled
    High,
}

impl ResourceLevel {
    /// Level for the given number of enabled features.
    #[must_use]
    pub fn for_enabled(enabled: usize) -> Self {
        match enabled {
            0..=2 => Self::Low,
            3..=4 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Estimate for one scan configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEstimate {
    /// Approximate number of hosts, not deduplicated
    pub total_targets: u64,
    /// Estimated duration in seconds
    pub total_seconds: f64,
    /// Operator-facing duration, e.g. `~24 seconds`
    pub duration_label: String,
    /// Expected service load
    pub resource_level: ResourceLevel,
}

/// Approximate host count of one segment entry.
#[must_use]
pub fn segment_targets(segment: &str) -> u64 {
    if segment.contains("/24") {
        return SLASH_24_TARGETS;
    }
    if segment.contains("/16") {
        return SLASH_16_TARGETS;
    }
    if !segment.contains('-') {
        return 1;
    }

    let parts: Vec<&str> = segment.split('-').collect();
    if parts.len() != 2 {
        return 1;
    }

    let start = leading_integer(parts[0].rsplit('.').next().unwrap_or_default());
    let end = leading_integer(parts[1]);

    match (start, end) {
        (Some(start), Some(end)) => u64::try_from(end - start + 1).unwrap_or(0),
        _ => UNPARSED_RANGE_TARGETS,
    }
}

/// Integer formed by the leading digits of `value`, ignoring what follows.
/// `"10.0.0.50"` reads as 10.
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Approximate host count of a target set.
#[must_use]
pub fn count_targets(targets: &TargetSpec) -> u64 {
    let addresses = targets.addresses.len() as u64;
    let segments: u64 = targets.segments.iter().map(|s| segment_targets(s)).sum();
    addresses.saturating_add(segments)
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Render a duration given in tenths of a second.
#[must_use]
pub fn duration_label(tenths: u64) -> String {
    if tenths < TENTHS_PER_MINUTE {
        return format!("~{} seconds", tenths.div_ceil(10));
    }
    if tenths < TENTHS_PER_HOUR {
        return format!("~{} minutes", tenths.div_ceil(TENTHS_PER_MINUTE));
    }

    let mut hours = tenths / TENTHS_PER_HOUR;
    let mut minutes = (tenths % TENTHS_PER_HOUR).div_ceil(TENTHS_PER_MINUTE);
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }

    if minutes == 0 {
        format!("~{}", plural(hours, "hour"))
    } else {
        format!("~{} {}", plural(hours, "hour"), plural(minutes, "minute"))
    }
}

/// Estimate duration and load for scanning `targets` with `settings`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate(targets: &TargetSpec, settings: &ScanSettings) -> ScanEstimate {
    let enabled = settings.enabled_count();
    let total_targets = count_targets(targets);

    let multiplier = MULTIPLIER_BASE + MULTIPLIER_PER_SETTING * enabled as u64;
    let tenths = total_targets
        .saturating_mul(BASE_TENTHS_PER_TARGET)
        .saturating_mul(multiplier)
        / MULTIPLIER_BASE;

    ScanEstimate {
        total_targets,
        total_seconds: tenths as f64 / 10.0,
        duration_label: duration_label(tenths),
        resource_level: ResourceLevel::for_enabled(enabled),
    }
}
