//! HTTP client for the Remote Product Service

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use dashboard_core::DomainError;
use dashboard_shared::config::RemoteSettings;

/// Longest slice of an error body carried into a `Rejected` error.
const MAX_ERROR_BODY: usize = 200;

pub fn create_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Base URL plus a shared `reqwest::Client`. Cheap to clone.
#[derive(Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_settings(settings: &RemoteSettings) -> Result<Self, reqwest::Error> {
        Ok(Self::new(create_client(settings.timeout_secs)?, settings.base_url.clone()))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Sends the request and turns transport failures and non-2xx statuses into domain errors.
    pub async fn send(&self, request: RequestBuilder, op: &str) -> Result<Response, DomainError> {
        let response = request.send().await.map_err(|e| {
            error!("Remote {} failed to complete: {}", op, e);
            DomainError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(MAX_ERROR_BODY).collect();
            warn!("Remote {} rejected with {}: {}", op, status, message);
            return Err(DomainError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Remote {} -> {}", op, status);
        Ok(response)
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &str,
    ) -> Result<T, DomainError> {
        let response = self.send(request, op).await?;
        response.json::<T>().await.map_err(|e| {
            error!("Remote {} returned an unreadable body: {}", op, e);
            if e.is_decode() {
                DomainError::Decode(e.to_string())
            } else {
                DomainError::Transport(e.to_string())
            }
        })
    }
}
