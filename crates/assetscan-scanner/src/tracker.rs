//! Progress tracking for a running scan job.
//!
//! A tracker owns one background task that polls the job until it reaches a
//! terminal status. Fetches are strictly sequential: the next poll is
//! scheduled only after the previous one has settled, so snapshots are
//! applied in completion order.
//!
//! ```text
//! Loading ──fetch ok──▶ Active(status) ──terminal──▶ on_complete(job), stop
//!    │                      │
//!    └──fetch err──▶ keep last snapshot, set failure, poll again
//! ```

use assetscan_api::{ApiError, JobStatus, Result as ApiResult, ScanJob, ScanJobClient};
use assetscan_core::JobId;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default time between the end of one poll and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Where the tracker gets job state from.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch the current state of a job.
    async fn fetch_job(&self, id: &JobId) -> ApiResult<ScanJob>;
}

#[async_trait]
impl JobSource for ScanJobClient {
    async fn fetch_job(&self, id: &JobId) -> ApiResult<ScanJob> {
        self.fetch(id).await
    }
}

/// Tracker state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No successful fetch yet
    Loading,
    /// Last fetched status
    Active(JobStatus),
}

/// Why the most recent poll failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollFailure {
    /// The service rejected the session
    Authentication,
    /// Anything else; polling continues
    Transient,
}

impl PollFailure {
    /// Classify a fetch error.
    #[must_use]
    pub fn from_error(error: &ApiError) -> Self {
        if error.is_unauthorized() {
            Self::Authentication
        } else {
            Self::Transient
        }
    }

    /// Operator-facing message.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error. Please log out and log back in.",
            Self::Transient => "Failed to fetch scan progress. Will retry automatically...",
        }
    }
}

impl fmt::Display for PollFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What observers see after each poll.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Current phase
    pub phase: TrackerPhase,
    /// Last successfully fetched job, kept across failed polls
    pub job: Option<ScanJob>,
    /// Completion percentage, 0..=100, never decreasing
    pub progress: u8,
    /// Failure of the most recent poll, cleared by the next success
    pub failure: Option<PollFailure>,
}

impl ProgressSnapshot {
    fn loading() -> Self {
        Self {
            phase: TrackerPhase::Loading,
            job: None,
            progress: 0,
            failure: None,
        }
    }

    /// Whether the last fetched status is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, TrackerPhase::Active(status) if status.is_terminal())
    }

    /// Message for the current failure, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.failure.map(PollFailure::message)
    }
}

/// Polls a job source until the job finishes.
pub struct ScanProgressTracker {
    source: Arc<dyn JobSource>,
    interval: Duration,
}

impl ScanProgressTracker {
    /// Create a tracker polling every [`DEFAULT_POLL_INTERVAL`].
    pub fn new(source: Arc<dyn JobSource>) -> Self {
        Self {
            source,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the time between polls.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start tracking `job_id`.
    ///
    /// The first fetch happens immediately. `on_complete` runs at most once,
    /// with the first terminal snapshot of the job, unless tracking is
    /// cancelled first. Must be called within a tokio runtime.
    pub fn start<F>(&self, job_id: JobId, on_complete: F) -> TrackerHandle
    where
        F: FnOnce(ScanJob) + Send + 'static,
    {
        let (tx, rx) = watch::channel(ProgressSnapshot::loading());
        let cancel = CancellationToken::new();

        let task = tokio::spawn(poll_job(
            self.source.clone(),
            job_id,
            self.interval,
            tx,
            cancel.clone(),
            on_complete,
        ));

        TrackerHandle {
            cancel,
            snapshots: rx,
            task: Some(task),
        }
    }
}

async fn poll_job<F>(
    source: Arc<dyn JobSource>,
    job_id: JobId,
    interval: Duration,
    tx: watch::Sender<ProgressSnapshot>,
    cancel: CancellationToken,
    on_complete: F,
) where
    F: FnOnce(ScanJob) + Send + 'static,
{
    let mut on_complete = Some(on_complete);
    let mut progress: u8 = 0;
    tracing::debug!("Tracking scan job {}", job_id);

    loop {
        let result = source.fetch_job(&job_id).await;
        if cancel.is_cancelled() {
            tracing::debug!("Tracking of scan job {} cancelled, discarding fetch", job_id);
            break;
        }

        match result {
            Ok(job) => {
                if let Some(percent) = job.progress() {
                    progress = progress.max(percent);
                }
                let terminal = job.is_terminal();
                tracing::debug!(
                    "Scan job {} is {} ({}/{})",
                    job_id,
                    job.status,
                    job.completed_targets,
                    job.total_targets
                );

                tx.send_replace(ProgressSnapshot {
                    phase: TrackerPhase::Active(job.status),
                    job: Some(job.clone()),
                    progress,
                    failure: None,
                });

                if terminal {
                    tracing::info!("Scan job {} finished with status {}", job_id, job.status);
                    if let Some(callback) = on_complete.take() {
                        callback(job);
                    }
                    break;
                }
            }
            Err(e) => {
                let failure = PollFailure::from_error(&e);
                tracing::warn!("Failed to fetch scan job {}: {}", job_id, e);
                tx.send_modify(|snapshot| snapshot.failure = Some(failure));
            }
        }

        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Tracking of scan job {} cancelled", job_id);
                break;
            }
            () = tokio::time::sleep(interval) => {}
        }
    }
}

/// Handle to a running tracker. Dropping it stops polling.
pub struct TrackerHandle {
    cancel: CancellationToken,
    snapshots: watch::Receiver<ProgressSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    /// Latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every poll.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.snapshots.clone()
    }

    /// Stop polling. A fetch already in flight completes but is ignored.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether tracking was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the polling task to stop and return the final snapshot.
    pub async fn join(&mut self) -> ProgressSnapshot {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Progress tracker task failed: {}", e);
            }
        }
        self.snapshot()
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            PollFailure::from_error(&ApiError::Unauthorized).message(),
            "Authentication error. Please log out and log back in."
        );
        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(
            PollFailure::from_error(&err).to_string(),
            "Failed to fetch scan progress. Will retry automatically..."
        );
    }

    #[test]
    fn test_loading_snapshot() {
        let snapshot = ProgressSnapshot::loading();
        assert_eq!(snapshot.phase, TrackerPhase::Loading);
        assert!(!snapshot.is_terminal());
        assert!(snapshot.error_message().is_none());
        assert_eq!(snapshot.progress, 0);
    }
}
