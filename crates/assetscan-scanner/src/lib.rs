//! Assetscan Scanner - scan preparation and progress tracking.
//!
//! This crate turns operator input into scan jobs and follows them to
//! completion. It never scans anything itself; the remote service does.
//!
//! # Features
//!
//! - Target parsing from comma-separated address and segment fields
//! - Duration and resource estimate before submission
//! - Create-then-run submission with orphaned job reporting
//! - Polling progress tracker with cancellation and a completion callback
//!
//! # Example
//!
//! ```rust,ignore
//! use assetscan_scanner::{submit_scan, ScanDraft, ScanProgressTracker, SubmitOptions};
//! use std::sync::Arc;
//!
//! let draft = ScanDraft {
//!     raw_segments: "192.168.1.0/24".to_string(),
//!     ..ScanDraft::new("Office sweep")
//! };
//! println!("Estimated: {}", draft.estimate().duration_label);
//!
//! let job = submit_scan(&jobs, &draft.into_request()?, SubmitOptions::default()).await?;
//!
//! let tracker = ScanProgressTracker::new(Arc::new(jobs.clone()));
//! let mut handle = tracker.start(job.id, |job| println!("{} finished", job.name));
//! let last = handle.join().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod draft;
pub mod error;
pub mod estimate;
#[allow(missing_docs)]
pub mod submit;
#[allow(missing_docs)]
pub mod targets;
pub mod tracker;

// Re-export commonly used types
pub use draft::ScanDraft;
pub use error::{Result, SubmitError};
pub use estimate::{estimate, ResourceLevel, ScanEstimate};
pub use submit::{submit_scan, SubmitOptions};
pub use targets::parse as parse_targets;
pub use tracker::{
    JobSource, PollFailure, ProgressSnapshot, ScanProgressTracker, TrackerHandle, TrackerPhase,
    DEFAULT_POLL_INTERVAL,
};
