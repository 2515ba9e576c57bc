//! Address backend client
//!
//! Talks to the `address` resource of the backend: create is a POST,
//! read-all is a GET. No retries.

use crate::address::AddressRecord;
use crate::constants::api::ADDRESS_RESOURCE;
use crate::error::{Error, Result};
use crate::store::StoredAddress;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body of a create request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAddressRequest {
    #[serde(rename = "addressData")]
    pub address_data: AddressRecord,
}

/// HTTP client for the backend `address` resource
#[derive(Debug, Clone)]
pub struct AddressService {
    client: reqwest::Client,
    base_url: String,
}

impl AddressService {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client for the configured backend
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(&config.backend.base_url)
    }

    fn resource_url(&self) -> String {
        format!("{}/{}", self.base_url, ADDRESS_RESOURCE)
    }

    /// Fetch every stored address
    ///
    /// GET /address
    pub async fn get_all(&self) -> Result<Vec<StoredAddress>> {
        let response = self.client.get(self.resource_url()).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Store an address record
    ///
    /// POST /address
    pub async fn create(&self, record: &AddressRecord) -> Result<StoredAddress> {
        let body = CreateAddressRequest {
            address_data: record.clone(),
        };

        let response = self
            .client
            .post(self.resource_url())
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let stored: StoredAddress = response.json().await?;
        debug!(id = %stored.id, "Address created");
        Ok(stored)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Backend(format!("{} returned {}: {}", ADDRESS_RESOURCE, status, body)))
    }
}
