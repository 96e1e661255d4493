/// Reaction to the service reporting the current session invalid.
///
/// By the time this is called the session has already been cleared from the
/// store. Implementations send the operator back to the login entry point.
pub trait SessionRecovery: Send + Sync {
    fn on_session_expired(&self);
}

/// Recovery that only records the expiry in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRecovery;

impl SessionRecovery for LogRecovery {
    fn on_session_expired(&self) {
        tracing::warn!("Session expired. Log in again to continue.");
    }
}
