//! Admin API client for triggering service reloads on a running server.

use std::time::Duration;

use reqwest::Client;
use shared_types::RELOAD_SERVICES_PARAM;
use thiserror::Error;
use tx_02_taxii_gateway::AdminAck;

/// Errors that can occur when communicating with the admin path.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server answered with HTTP {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Admin API client.
pub struct AdminApiClient {
    client: Client,
    admin_url: String,
}

impl AdminApiClient {
    /// Create a client for the admin path at `admin_url`,
    /// e.g. `http://127.0.0.1:8000/admin/`.
    pub fn new(admin_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            admin_url: admin_url.into(),
        })
    }

    /// Ask the server to reload its service list on the next Discovery.
    pub async fn reload_services(&self) -> Result<AdminAck, ApiError> {
        let response = self
            .client
            .post(&self.admin_url)
            .query(&[(RELOAD_SERVICES_PARAM, "true")])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ApiError::Connection(format!("Cannot connect to {}", self.admin_url))
                } else {
                    ApiError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
