//! Error types for scan submission.

use assetscan_api::ApiError;
use assetscan_core::JobId;
use thiserror::Error;

/// Failure of the create-then-run submission flow.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The request was rejected locally; nothing was sent
    #[error("invalid scan request: {0}")]
    Invalid(#[source] ApiError),

    /// The service did not store the job
    #[error("failed to create scan job: {0}")]
    Create(#[source] ApiError),

    /// The job was stored but could not be started
    #[error("scan job {job_id} was created but failed to start: {source}")]
    Run {
        /// Id of the stored job
        job_id: JobId,
        /// Error from the run call
        #[source]
        source: ApiError,
        /// Whether the stored job was deleted again
        removed: bool,
    },
}

impl SubmitError {
    /// Id of a job left on the service without having been started.
    #[must_use]
    pub fn orphaned_job(&self) -> Option<&JobId> {
        match self {
            Self::Run {
                job_id,
                removed: false,
                ..
            } => Some(job_id),
            _ => None,
        }
    }

    /// The underlying API error.
    #[must_use]
    pub fn api_error(&self) -> &ApiError {
        match self {
            Self::Invalid(e) | Self::Create(e) | Self::Run { source: e, .. } => e,
        }
    }
}

/// Result type alias for submissions.
pub type Result<T> = std::result::Result<T, SubmitError>;
