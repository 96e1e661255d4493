//! Plain-text rendering of service records.

use assetscan_api::{Asset, ScanJob, ScanResult};
use assetscan_auth::Session;
use assetscan_scanner::{ProgressSnapshot, ScanEstimate, TrackerPhase};
use chrono::NaiveDateTime;

fn timestamp(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn job_line(job: &ScanJob) -> String {
    format!(
        "{:<26} {:<10} {:>4}/{:<4} {}",
        job.id.as_str(),
        job.status,
        job.completed_targets,
        job.total_targets,
        job.name
    )
}

pub fn job_detail(job: &ScanJob) -> String {
    let mut lines = vec![
        format!("Id:          {}", job.id),
        format!("Name:        {}", job.name),
        format!("Status:      {}", job.status),
    ];
    if !job.description.is_empty() {
        lines.push(format!("Description: {}", job.description));
    }
    lines.push(format!(
        "Targets:     {}/{} done ({} ok, {} failed)",
        job.completed_targets, job.total_targets, job.successful_targets, job.failed_targets
    ));
    if !job.ip_addresses.is_empty() {
        lines.push(format!("Addresses:   {}", job.ip_addresses.join(", ")));
    }
    if !job.ip_segments.is_empty() {
        lines.push(format!("Segments:    {}", job.ip_segments.join(", ")));
    }
    if job.recurring {
        lines.push(format!("Schedule:    {}", or_dash(Some(&job.schedule))));
        lines.push(format!("Next run:    {}", timestamp(job.next_run_at)));
    }
    lines.push(format!("Created:     {}", timestamp(job.created_at)));
    lines.push(format!("Last run:    {}", timestamp(job.last_run_at)));
    lines.join("\n")
}

pub fn result_line(result: &ScanResult) -> String {
    let outcome = if result.successful {
        "ok".to_string()
    } else {
        format!("failed: {}", or_dash(result.error_message.as_deref()))
    };
    format!(
        "{:<16} {:<24} {:<19} {}",
        result.ip_address,
        or_dash(result.hostname.as_deref()),
        timestamp(result.scan_time),
        outcome
    )
}

pub fn asset_line(asset: &Asset) -> String {
    format!(
        "{:<26} {:<16} {:<24} {:<12} {:<7} {}",
        asset.id,
        asset.ip_address,
        or_dash(asset.hostname.as_deref()),
        or_dash(asset.asset_type.as_deref()),
        if asset.online { "online" } else { "offline" },
        or_dash(asset.operating_system.as_deref())
    )
}

pub fn asset_detail(asset: &Asset) -> String {
    let mut lines = vec![
        format!("Id:           {}", asset.id),
        format!("Address:      {}", asset.ip_address),
        format!("Hostname:     {}", or_dash(asset.hostname.as_deref())),
        format!("Type:         {}", or_dash(asset.asset_type.as_deref())),
        format!(
            "OS:           {} {}",
            or_dash(asset.operating_system.as_deref()),
            asset.os_version.as_deref().unwrap_or_default()
        )
        .trim_end()
        .to_string(),
        format!("MAC:          {}", or_dash(asset.mac_address.as_deref())),
        format!("Manufacturer: {}", or_dash(asset.manufacturer.as_deref())),
        format!("Model:        {}", or_dash(asset.model.as_deref())),
        format!("Online:       {}", if asset.online { "yes" } else { "no" }),
        format!("First seen:   {}", timestamp(asset.first_discovered)),
        format!("Last seen:    {}", timestamp(asset.last_seen)),
    ];
    for (key, value) in &asset.additional_info {
        lines.push(format!("  {key}: {value}"));
    }
    lines.join("\n")
}

pub fn estimate_summary(estimate: &ScanEstimate) -> String {
    format!(
        "Targets: {}\nEstimated duration: {}\nResource usage: {}",
        estimate.total_targets, estimate.duration_label, estimate.resource_level
    )
}

pub fn session_summary(session: &Session) -> String {
    let roles: Vec<&str> = session.roles().iter().map(String::as_str).collect();
    format!(
        "Logged in as {} ({})\nEmail: {}\nRoles: {}",
        session.username(),
        session.user_id(),
        or_dash(Some(session.email())),
        if roles.is_empty() {
            "-".to_string()
        } else {
            roles.join(", ")
        }
    )
}

/// Progress bar message for a snapshot; the percentage is drawn by the bar.
pub fn progress_message(snapshot: &ProgressSnapshot) -> String {
    let mut message = match (&snapshot.phase, &snapshot.job) {
        (TrackerPhase::Active(status), Some(job)) => format!(
            "{status} ({}/{} targets, {} ok, {} failed)",
            job.completed_targets, job.total_targets, job.successful_targets, job.failed_targets
        ),
        _ => "Loading scan job...".to_string(),
    };
    if let Some(failure) = snapshot.error_message() {
        message.push_str(" - ");
        message.push_str(failure);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetscan_api::JobStatus;
    use assetscan_scanner::PollFailure;

    fn job() -> ScanJob {
        serde_json::from_value(serde_json::json!({
            "id": "job-1",
            "name": "Office sweep",
            "status": "RUNNING",
            "totalTargets": 10,
            "completedTargets": 4,
            "successfulTargets": 3,
            "failedTargets": 1,
            "createdAt": "2024-03-01T10:15:30"
        }))
        .unwrap()
    }

    #[test]
    fn test_progress_message_states() {
        let loading = ProgressSnapshot {
            phase: TrackerPhase::Loading,
            job: None,
            progress: 0,
            failure: None,
        };
        assert_eq!(progress_message(&loading), "Loading scan job...");

        let active = ProgressSnapshot {
            phase: TrackerPhase::Active(JobStatus::Running),
            job: Some(job()),
            progress: 40,
            failure: Some(PollFailure::Transient),
        };
        assert_eq!(
            progress_message(&active),
            "RUNNING (4/10 targets, 3 ok, 1 failed) - Failed to fetch scan progress. Will retry automatically..."
        );
    }

    #[test]
    fn test_job_detail() {
        let detail = job_detail(&job());
        assert!(detail.contains("Status:      RUNNING"));
        assert!(detail.contains("Created:     2024-03-01 10:15:30"));
        assert!(detail.contains("Last run:    -"));
        assert!(!detail.contains("Schedule"));
    }

    #[test]
    fn test_session_summary() {
        let session = Session::new("t", "u-1", "operator", "", vec!["ROLE_USER".to_string()]);
        let summary = session_summary(&session);
        assert!(summary.starts_with("Logged in as operator (u-1)"));
        assert!(summary.contains("Email: -"));
        assert!(summary.contains("Roles: ROLE_USER"));
    }
}
