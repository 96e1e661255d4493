//! Assetscan Authentication Layer
//!
//! Holds the authenticated identity of the operator and the bearer token used
//! for every call to the scanning service.
//!
//! # Components
//!
//! - [`Session`]: identity + bearer token returned by sign-in
//! - [`SessionStore`]: where the current session lives
//!   ([`MemorySessionStore`] for one process, [`FileSessionStore`] across runs)
//! - [`SessionRecovery`]: what happens when the service reports the session
//!   invalid (send the operator back to the login entry point)
//!
//! # Session Management
//!
//! - The session store has a single writer: the API layer's session client
//! - Session tokens are zeroized from memory when dropped
//! - No refresh-token exchange exists; an expired session means a new login

use thiserror::Error;

mod recovery;
mod session;
mod store;

pub use recovery::{LogRecovery, SessionRecovery};
pub use session::Session;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session file could not be read or written
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Persisted session is not valid JSON
    #[error("session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Not authenticated
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
