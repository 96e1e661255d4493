//! Operator hints for command failures.

use assetscan_api::ApiError;
use assetscan_auth::AuthError;
use assetscan_scanner::SubmitError;

fn api_hint(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Session(AuthError::NotAuthenticated) => {
            Some("Not logged in. Run `assetscan login <username>` first.".to_string())
        }
        ApiError::Session(AuthError::Corrupt(_)) => {
            Some("The stored session is unreadable. Run `assetscan logout` and log in again.".to_string())
        }
        ApiError::InvalidCredentials => Some("Check the username and password.".to_string()),
        ApiError::Network(_) => Some(
            "Is the scanning service reachable? Check `api.base_url` in the config file or ASSETSCAN_API_URL."
                .to_string(),
        ),
        _ => None,
    }
}

/// Suggested next step for an error, if there is an obvious one.
pub fn hint(err: &anyhow::Error) -> Option<String> {
    for cause in err.chain() {
        if let Some(submit) = cause.downcast_ref::<SubmitError>() {
            if let Some(id) = submit.orphaned_job() {
                return Some(format!(
                    "Job {id} was stored but not started. Start it with `assetscan scan run {id}` or remove it with `assetscan scan delete {id}`."
                ));
            }
            return api_hint(submit.api_error());
        }
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            return api_hint(api);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use assetscan_core::JobId;

    #[test]
    fn test_hint_for_missing_session() {
        let err: anyhow::Result<()> =
            Err(ApiError::Session(AuthError::NotAuthenticated)).context("Failed to list scan jobs");
        let hint = hint(&err.unwrap_err()).expect("hint");
        assert!(hint.contains("assetscan login"));
    }

    #[test]
    fn test_hint_for_orphaned_job() {
        let err = anyhow::Error::new(SubmitError::Run {
            job_id: JobId::new("job-3").unwrap(),
            source: ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            },
            removed: false,
        });
        let hint = hint(&err).expect("hint");
        assert!(hint.contains("assetscan scan run job-3"));
    }

    #[test]
    fn test_no_hint_for_plain_status() {
        let err = anyhow::Error::new(ApiError::Status {
            status: 404,
            message: "not found".to_string(),
        });
        assert!(hint(&err).is_none());
    }
}
