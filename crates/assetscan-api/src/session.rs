//! Authenticated request pipeline.
//!
//! Every API client sends through [`SessionClient`], which attaches the bearer
//! token and runs the session-expiry recovery when the service answers 401.

use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use assetscan_auth::{AuthError, Session, SessionRecovery, SessionStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared request pipeline and sole owner of the session store.
pub struct SessionClient {
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn SessionStore>,
    recovery: Arc<dyn SessionRecovery>,
    /// Set after a recovery ran; cleared by `login`.
    recovered: AtomicBool,
}

impl SessionClient {
    /// Create a client over the given transport, store and recovery hook.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn SessionStore>,
        recovery: Arc<dyn SessionRecovery>,
    ) -> Self {
        Self {
            transport,
            store,
            recovery,
            recovered: AtomicBool::new(false),
        }
    }

    /// Current session, if any.
    ///
    /// # Errors
    /// Returns error if the session store cannot be read.
    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.store.load()?)
    }

    /// Current session, or [`AuthError::NotAuthenticated`].
    ///
    /// # Errors
    /// Returns error if no session is stored or the store cannot be read.
    pub fn require_session(&self) -> Result<Session> {
        self.session()?
            .ok_or(ApiError::Session(AuthError::NotAuthenticated))
    }

    /// Establish a new session and re-arm expiry recovery.
    ///
    /// # Errors
    /// Returns error if the session cannot be stored.
    pub fn login(&self, session: &Session) -> Result<()> {
        self.store.save(session)?;
        self.recovered.store(false, Ordering::SeqCst);
        tracing::info!("Logged in as {}", session.username());
        Ok(())
    }

    /// Drop the current session. Returns `true` if one was present.
    ///
    /// # Errors
    /// Returns error if the store cannot be cleared.
    pub fn logout(&self) -> Result<bool> {
        let removed = self.store.clear()?;
        if removed {
            tracing::info!("Logged out");
        }
        Ok(removed)
    }

    /// Send a request and return the successful response.
    ///
    /// Non-2xx responses become errors. A 401 on a request that is not
    /// marked retried clears the session and notifies the recovery hook,
    /// unless a recovery already happened since the last login.
    ///
    /// # Errors
    /// Returns [`ApiError::Unauthorized`] on 401, [`ApiError::Status`] on any
    /// other non-2xx status, or the transport's error.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        if request.authorization.is_none() {
            request.authorization = self.stored_authorization()?;
        }

        let method = request.method.clone();
        let path = request.path.clone();
        let retried = request.retried;
        tracing::debug!("{} {}", method, path);

        let response = self.transport.execute(request).await?;
        tracing::debug!("{} {} -> {}", method, path, response.status);

        if response.is_success() {
            return Ok(response);
        }

        if response.status == 401 {
            if !retried {
                self.recover();
            }
            return Err(ApiError::Unauthorized);
        }

        Err(ApiError::Status {
            status: response.status,
            message: response.error_message(),
        })
    }

    /// Bearer header of the stored session. An unreadable session file is
    /// treated as no session so that signing in can replace it.
    fn stored_authorization(&self) -> Result<Option<String>> {
        match self.store.load() {
            Ok(session) => Ok(session.map(|s| s.authorization())),
            Err(AuthError::Corrupt(e)) => {
                tracing::warn!("Stored session is unreadable, sending without credentials: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn recover(&self) {
        if self.recovered.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session recovery already performed, ignoring 401");
            return;
        }

        tracing::warn!("Service rejected the session, clearing it");
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear session store: {}", e);
        }
        self.recovery.on_session_expired();
    }

    /// GET a path and decode the JSON body.
    ///
    /// # Errors
    /// Returns error if the request fails or the body does not decode.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(path)).await?.json(path)
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// # Errors
    /// Returns error if the request fails or the body does not decode.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(ApiRequest::post(path, body)).await?.json(path)
    }

    /// POST an empty JSON object, ignoring the response body.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::post_empty(path)).await?;
        Ok(())
    }

    /// DELETE a path, ignoring the response body.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetscan_auth::MemorySessionStore;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    struct FixedTransport {
        status: u16,
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(ApiResponse::new(self.status, "{}"))
        }
    }

    #[derive(Default)]
    struct CountingRecovery(AtomicUsize);

    impl SessionRecovery for CountingRecovery {
        fn on_session_expired(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn session() -> Session {
        Session::new("tok", "u-1", "operator", "", Vec::new())
    }

    #[tokio::test]
    async fn test_marked_request_skips_recovery() {
        let transport = Arc::new(FixedTransport {
            status: 401,
            seen: Mutex::new(Vec::new()),
        });
        let recovery = Arc::new(CountingRecovery::default());
        let store = Arc::new(MemorySessionStore::with_session(session()));
        let client = SessionClient::new(transport, store.clone(), recovery.clone());

        let err = client
            .send(ApiRequest::get("assets").mark_retried())
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(recovery.0.load(Ordering::SeqCst), 0);
        assert!(store.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_require_session() {
        let transport = Arc::new(FixedTransport {
            status: 200,
            seen: Mutex::new(Vec::new()),
        });
        let client = SessionClient::new(
            transport,
            Arc::new(MemorySessionStore::new()),
            Arc::new(CountingRecovery::default()),
        );
        assert!(matches!(
            client.require_session(),
            Err(ApiError::Session(AuthError::NotAuthenticated))
        ));

        client.login(&session()).unwrap();
        assert_eq!(client.require_session().unwrap().username(), "operator");
        assert!(client.logout().unwrap());
        assert!(!client.logout().unwrap());
    }
}
