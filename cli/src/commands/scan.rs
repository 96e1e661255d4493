use crate::output;
use crate::state::AppState;
use anyhow::{bail, Context, Result};
use assetscan_core::{JobId, ScanSettings, Schedule};
use assetscan_scanner::{submit_scan, ScanDraft};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tokio::sync::oneshot;

/// Target and feature arguments shared by `estimate` and `submit`.
#[derive(Debug, Clone, Default)]
pub struct TargetInput {
    pub addresses: String,
    pub segments: String,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
}

impl TargetInput {
    fn settings(&self) -> Result<ScanSettings> {
        let mut settings = ScanSettings::default();
        for (names, enabled) in [(&self.enable, true), (&self.disable, false)] {
            for name in names {
                if !settings.set_enabled(name, enabled) {
                    let known: Vec<&str> = settings.iter().map(|s| s.name.as_str()).collect();
                    bail!("Unknown scan setting '{name}'. Known settings: {}", known.join(", "));
                }
            }
        }
        Ok(settings)
    }

    fn draft(&self, name: &str) -> Result<ScanDraft> {
        Ok(ScanDraft {
            raw_addresses: self.addresses.clone(),
            raw_segments: self.segments.clone(),
            settings: self.settings()?,
            ..ScanDraft::new(name)
        })
    }
}

fn parse_id(id: &str) -> Result<JobId> {
    JobId::new(id).with_context(|| format!("Invalid scan job id '{id}'"))
}

pub fn estimate(input: &TargetInput, out: &mut impl Write) -> Result<()> {
    let draft = input.draft("")?;
    let enabled: Vec<&str> = draft.settings.enabled_names().collect();
    writeln!(out, "{}", output::estimate_summary(&draft.estimate()))?;
    writeln!(
        out,
        "Enabled: {}",
        if enabled.is_empty() {
            "-".to_string()
        } else {
            enabled.join(", ")
        }
    )?;
    Ok(())
}

/// Options of `scan submit` beyond the targets.
#[derive(Debug, Clone, Default)]
pub struct SubmitInput {
    pub name: String,
    pub description: String,
    pub schedule: Option<Schedule>,
    pub watch: bool,
}

pub async fn submit(
    state: &AppState,
    input: &SubmitInput,
    targets: &TargetInput,
    out: &mut impl Write,
) -> Result<()> {
    let schedule = input.schedule.unwrap_or_default();
    let draft = ScanDraft {
        description: input.description.clone(),
        recurring: schedule != Schedule::None,
        schedule,
        ..targets.draft(&input.name)?
    };

    let estimate = draft.estimate();
    writeln!(
        out,
        "Estimated duration: {} ({} targets, {} resource usage)",
        estimate.duration_label, estimate.total_targets, estimate.resource_level
    )?;

    let request = draft.into_request().context("Invalid scan")?;
    let job = submit_scan(&state.scan_jobs(), &request, state.submit_options())
        .await
        .context("Failed to submit scan")?;
    writeln!(out, "Started scan job {} ({})", job.id, job.name)?;

    if input.watch {
        watch_job(state, job.id, out).await?;
    }
    Ok(())
}

pub async fn run(state: &AppState, id: &str, watch: bool, out: &mut impl Write) -> Result<()> {
    let id = parse_id(id)?;
    state
        .scan_jobs()
        .run(&id)
        .await
        .with_context(|| format!("Failed to start scan job {id}"))?;
    writeln!(out, "Started scan job {id}")?;
    if watch {
        watch_job(state, id, out).await?;
    }
    Ok(())
}

pub async fn list(state: &AppState, out: &mut impl Write) -> Result<()> {
    let jobs = state
        .scan_jobs()
        .list()
        .await
        .context("Failed to list scan jobs")?;
    if jobs.is_empty() {
        writeln!(out, "No scan jobs")?;
    }
    for job in &jobs {
        writeln!(out, "{}", output::job_line(job))?;
    }
    Ok(())
}

pub async fn show(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let id = parse_id(id)?;
    let job = state
        .scan_jobs()
        .fetch(&id)
        .await
        .with_context(|| format!("Failed to fetch scan job {id}"))?;
    writeln!(out, "{}", output::job_detail(&job))?;
    Ok(())
}

pub async fn results(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let id = parse_id(id)?;
    let results = state
        .scan_jobs()
        .fetch_results(&id)
        .await
        .with_context(|| format!("Failed to fetch results of scan job {id}"))?;
    if results.is_empty() {
        writeln!(out, "No results yet")?;
    }
    for result in &results {
        writeln!(out, "{}", output::result_line(result))?;
    }
    Ok(())
}

pub async fn delete(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let id = parse_id(id)?;
    state
        .scan_jobs()
        .remove(&id)
        .await
        .with_context(|| format!("Failed to delete scan job {id}"))?;
    writeln!(out, "Deleted scan job {id}")?;
    Ok(())
}

pub async fn watch(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    watch_job(state, parse_id(id)?, out).await
}

fn progress_bar() -> Result<ProgressBar> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}",
        )?
        .progress_chars("#>-"),
    );
    Ok(bar)
}

/// Draw a progress bar until the job finishes or the operator presses
/// Ctrl-C. Interrupting stops tracking only; the scan keeps running.
async fn watch_job(state: &AppState, id: JobId, out: &mut impl Write) -> Result<()> {
    let (done_tx, done_rx) = oneshot::channel();
    let mut handle = state.tracker().start(id.clone(), move |job| {
        let _ = done_tx.send(job);
    });
    let mut snapshots = handle.subscribe();

    let bar = progress_bar()?;
    bar.set_message(output::progress_message(&snapshots.borrow()));

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    bar.abandon();
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                bar.set_position(u64::from(snapshot.progress));
                bar.set_message(output::progress_message(&snapshot));
                if snapshot.is_terminal() {
                    bar.finish();
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                handle.cancel();
                bar.abandon_with_message("Stopped watching");
                writeln!(out, "Stopped watching scan job {id}; it keeps running on the service")?;
                break;
            }
        }
    }

    handle.join().await;
    if let Ok(job) = done_rx.await {
        writeln!(
            out,
            "Scan job {} finished: {} ({} ok, {} failed of {})",
            job.id, job.status, job.successful_targets, job.failed_targets, job.total_targets
        )?;
    }
    Ok(())
}
