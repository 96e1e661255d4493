use assetscan_auth::SessionRecovery;

/// Instruction shown when the service rejects the stored session.
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired. Run `assetscan login <username>` to sign in again.";

/// Sends the operator back to `assetscan login`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliRecovery;

impl SessionRecovery for CliRecovery {
    fn on_session_expired(&self) {
        tracing::warn!("Session expired, stored credentials removed");
        eprintln!("{SESSION_EXPIRED_MESSAGE}");
    }
}
