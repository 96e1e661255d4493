//! Account endpoints.

use crate::error::{ApiError, Result};
use crate::models::{LoginRequest, MessageResponse, SignupRequest};
use crate::session::SessionClient;
use crate::transport::ApiRequest;
use assetscan_auth::Session;
use std::sync::Arc;

/// Sign-in, sign-up and sign-out.
#[derive(Clone)]
pub struct AuthClient {
    session: Arc<SessionClient>,
}

impl AuthClient {
    /// Create a client sharing the given session pipeline.
    pub fn new(session: Arc<SessionClient>) -> Self {
        Self { session }
    }

    /// Sign in and store the resulting session.
    ///
    /// The sign-in request bypasses session recovery, so rejected
    /// credentials surface as [`ApiError::InvalidCredentials`].
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] for blank credentials,
    /// [`ApiError::InvalidCredentials`] when the service rejects them, or
    /// the service error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::InvalidRequest(
                "username and password are required".to_string(),
            ));
        }

        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let request = ApiRequest::post("auth/signin", body).mark_retried();

        let response = match self.session.send(request).await {
            Ok(response) => response,
            Err(ApiError::Unauthorized) => return Err(ApiError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let session: Session = response.json("auth/signin")?;
        self.session.login(&session)?;
        Ok(session)
    }

    /// Create an account. Returns the service's confirmation message.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] for blank fields, or the service
    /// error (e.g. username already taken).
    pub async fn register(&self, request: &SignupRequest) -> Result<String> {
        request.validate()?;
        let body = serde_json::to_value(request)?;
        let response = self
            .session
            .send(ApiRequest::post("auth/signup", body).mark_retried())
            .await?;
        let message: MessageResponse = response.json("auth/signup")?;
        tracing::info!("Registered user {}", request.username);
        Ok(message.message)
    }

    /// Forget the stored session. Returns `true` if one was present.
    ///
    /// # Errors
    /// Returns error if the store cannot be cleared.
    pub fn logout(&self) -> Result<bool> {
        self.session.logout()
    }
}
