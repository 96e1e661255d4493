//! Assetscan API - typed client for the asset scanning service.
//!
//! All calls go through a shared [`SessionClient`], which attaches the bearer
//! token of the stored session and handles session expiry:
//!
//! ```text
//! ScanJobClient / AssetClient / AuthClient
//!             ↓
//!       SessionClient  ── 401 → clear store → SessionRecovery hook
//!             ↓
//!       HttpTransport (reqwest)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use assetscan_api::{ReqwestTransport, ScanJobClient, ScanJobRequest, SessionClient};
//! use assetscan_auth::{LogRecovery, MemorySessionStore};
//! use assetscan_core::TargetSpec;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new("http://localhost:8080/api/", 30)?;
//! let session = Arc::new(SessionClient::new(
//!     Arc::new(transport),
//!     Arc::new(MemorySessionStore::new()),
//!     Arc::new(LogRecovery),
//! ));
//!
//! let jobs = ScanJobClient::new(session);
//! let targets = TargetSpec {
//!     addresses: vec!["10.0.0.1".to_string()],
//!     segments: Vec::new(),
//! };
//! let job = jobs.create(&ScanJobRequest::new("Lab sweep", targets)).await?;
//! jobs.run(&job.id).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod auth;
pub mod error;
pub mod models;
pub mod scan_jobs;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use assets::AssetClient;
pub use auth::AuthClient;
pub use error::{ApiError, Result};
pub use models::{
    Asset, JobStatus, LoginRequest, MessageResponse, ScanJob, ScanJobRequest, ScanResult,
    SignupRequest,
};
pub use scan_jobs::ScanJobClient;
pub use session::SessionClient;
pub use transport::{build_http_client, ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
