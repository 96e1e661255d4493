//! Scan job endpoints.

use crate::error::Result;
use crate::models::{ScanJob, ScanJobRequest, ScanResult};
use crate::session::SessionClient;
use assetscan_core::JobId;
use std::sync::Arc;
use urlencoding::encode;

/// Typed access to the scan job endpoints.
///
/// Calls are single attempts; retrying is left to the caller.
#[derive(Clone)]
pub struct ScanJobClient {
    session: Arc<SessionClient>,
}

impl ScanJobClient {
    /// Create a client sharing the given session pipeline.
    pub fn new(session: Arc<SessionClient>) -> Self {
        Self { session }
    }

    /// Validate and store a new job. Nothing is sent if validation fails.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`](crate::ApiError::InvalidRequest)
    /// for an invalid request, or the service error.
    pub async fn create(&self, request: &ScanJobRequest) -> Result<ScanJob> {
        request.validate()?;
        let job: ScanJob = self.session.post_json("scan/create", request).await?;
        tracing::info!("Created scan job {} ({})", job.id, job.name);
        Ok(job)
    }

    /// Start execution of a stored job.
    ///
    /// The service acknowledges with an empty body; poll [`fetch`](Self::fetch)
    /// for the job's state.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn run(&self, id: &JobId) -> Result<()> {
        self.session
            .post_empty(&format!("scan/run/{}", encode(id.as_str())))
            .await?;
        tracing::info!("Started scan job {}", id);
        Ok(())
    }

    /// Fetch the current state of a job.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn fetch(&self, id: &JobId) -> Result<ScanJob> {
        self.session
            .get_json(&format!("scan/jobs/{}", encode(id.as_str())))
            .await
    }

    /// List the operator's jobs.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn list(&self) -> Result<Vec<ScanJob>> {
        self.session.get_json("scan/jobs").await
    }

    /// Delete a job.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn remove(&self, id: &JobId) -> Result<()> {
        self.session
            .delete(&format!("scan/jobs/{}", encode(id.as_str())))
            .await?;
        tracing::info!("Deleted scan job {}", id);
        Ok(())
    }

    /// Per-target results of a job.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn fetch_results(&self, id: &JobId) -> Result<Vec<ScanResult>> {
        self.session
            .get_json(&format!("scan/results/{}", encode(id.as_str())))
            .await
    }
}
