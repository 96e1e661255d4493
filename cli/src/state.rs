//! Application state management.

use crate::recovery::CliRecovery;
use anyhow::{Context, Result};
use assetscan_api::{
    AssetClient, AuthClient, HttpTransport, ReqwestTransport, ScanJobClient, SessionClient,
};
use assetscan_auth::{FileSessionStore, MemorySessionStore, SessionStore};
use assetscan_core::AppConfig;
use assetscan_scanner::{ScanProgressTracker, SubmitOptions};
use std::sync::Arc;

/// Clients and settings shared by all commands of one invocation.
pub struct AppState {
    /// Loaded configuration
    pub config: AppConfig,

    /// Request pipeline; owns the session store
    session: Arc<SessionClient>,
}

impl AppState {
    /// Build state from configuration, using the HTTP transport and the
    /// configured session store.
    pub fn new(config: AppConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.api.base_url.clone(), config.api.timeout_secs)
            .context("Failed to create HTTP client")?;
        let store = session_store(&config)?;

        tracing::debug!("Using scanning service at {}", config.api.base_url);
        Ok(Self::with_parts(config, Arc::new(transport), store))
    }

    /// Build state from explicit parts.
    pub fn with_parts(
        config: AppConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let session = Arc::new(SessionClient::new(
            transport,
            store,
            Arc::new(CliRecovery),
        ));
        Self { config, session }
    }

    /// Shared request pipeline.
    pub fn session(&self) -> &Arc<SessionClient> {
        &self.session
    }

    pub fn scan_jobs(&self) -> ScanJobClient {
        ScanJobClient::new(self.session.clone())
    }

    pub fn assets(&self) -> AssetClient {
        AssetClient::new(self.session.clone())
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.session.clone())
    }

    /// Progress tracker polling at the configured interval.
    pub fn tracker(&self) -> ScanProgressTracker {
        ScanProgressTracker::new(Arc::new(self.scan_jobs()))
            .with_interval(self.config.tracking.poll_interval())
    }

    pub fn submit_options(&self) -> SubmitOptions {
        SubmitOptions {
            remove_orphaned_jobs: self.config.scan.remove_orphaned_jobs,
        }
    }
}

/// File-backed store when sessions persist, in-memory otherwise.
fn session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>> {
    if config.session.persist {
        let path = AppConfig::session_path().context("Failed to locate session file")?;
        tracing::debug!("Session file: {}", path.display());
        Ok(Arc::new(FileSessionStore::new(path)))
    } else {
        Ok(Arc::new(MemorySessionStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_state_without_persistence() {
        let mut config = AppConfig::default();
        config.session.persist = false;
        config.tracking.poll_interval_ms = 500;
        config.scan.remove_orphaned_jobs = true;

        let state = AppState::new(config).expect("build state");
        assert!(state.session().session().unwrap().is_none());
        assert!(state.submit_options().remove_orphaned_jobs);
        assert_eq!(state.config.tracking.poll_interval(), Duration::from_millis(500));
    }
}
