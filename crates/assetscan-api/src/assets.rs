//! Asset inventory endpoints.

use crate::error::Result;
use crate::models::Asset;
use crate::session::SessionClient;
use std::sync::Arc;
use urlencoding::encode;

/// Read access to the asset inventory.
#[derive(Clone)]
pub struct AssetClient {
    session: Arc<SessionClient>,
}

impl AssetClient {
    /// Create a client sharing the given session pipeline.
    pub fn new(session: Arc<SessionClient>) -> Self {
        Self { session }
    }

    /// All assets visible to the operator.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn list(&self) -> Result<Vec<Asset>> {
        self.session.get_json("assets").await
    }

    /// One asset by id.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn get(&self, id: &str) -> Result<Asset> {
        self.session
            .get_json(&format!("assets/{}", encode(id)))
            .await
    }

    /// Assets of one type, e.g. `SERVER` or `PRINTER`.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn by_type(&self, asset_type: &str) -> Result<Vec<Asset>> {
        self.session
            .get_json(&format!("assets/type/{}", encode(asset_type)))
            .await
    }

    /// Assets by reachability at their last scan.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn by_online(&self, online: bool) -> Result<Vec<Asset>> {
        self.session
            .get_json(&format!("assets/online/{online}"))
            .await
    }
}
