use crate::error::{Result, SubmitError};
use assetscan_api::{ScanJob, ScanJobClient, ScanJobRequest};

/// Behavior of [`submit_scan`] when starting a stored job fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Delete the stored job again (one attempt, best effort)
    pub remove_orphaned_jobs: bool,
}

/// Validate, create and start a scan job.
///
/// Returns the job as stored by the create call; the run call carries no
/// body, so its status is whatever the service assigned on creation.
///
/// The two service calls are not atomic. If the run call fails the job
/// stays in `CREATED` on the service; the error carries its id, and with
/// `remove_orphaned_jobs` one delete is attempted.
///
/// # Errors
/// Returns [`SubmitError::Invalid`] without contacting the service,
/// [`SubmitError::Create`] if the job was not stored, or
/// [`SubmitError::Run`] if it was stored but not started.
pub async fn submit_scan(
    client: &ScanJobClient,
    request: &ScanJobRequest,
    options: SubmitOptions,
) -> Result<ScanJob> {
    request.validate().map_err(SubmitError::Invalid)?;

    let created = client.create(request).await.map_err(SubmitError::Create)?;

    match client.run(&created.id).await {
        Ok(()) => Ok(created),
        Err(source) => {
            tracing::error!("Scan job {} created but failed to start: {}", created.id, source);

            let removed = options.remove_orphaned_jobs
                && match client.remove(&created.id).await {
                    Ok(()) => {
                        tracing::info!("Removed unstarted scan job {}", created.id);
                        true
                    }
                    Err(e) => {
                        tracing::warn!("Failed to remove unstarted scan job {}: {}", created.id, e);
                        false
                    }
                };

            Err(SubmitError::Run {
                job_id: created.id,
                source,
                removed,
            })
        }
    }
}
