//! Identity service client
//!
//! The identity service mints shared ids on `GET <endpoint>` and confirms
//! locally generated ones on `POST <endpoint>`. Both answer with a JSON
//! object carrying the id under the remote id field.

use crate::Result;
use crate::config::Settings;
use serde_json::json;

use super::network::{NetworkManager, RequestOptions};

/// Trait for identity service operations to enable testing with mocks
#[async_trait::async_trait]
pub trait IdService: Send + Sync {
    /// Ask the service for a fresh shared id
    async fn fetch_id(&self) -> Result<String>;

    /// Submit a locally generated id and return the id the service confirms
    async fn sync_id(&self, stored_id: &str) -> Result<String>;
}

/// HTTP identity service client
#[derive(Debug, Clone)]
pub struct HttpIdService {
    network: NetworkManager,
    endpoint: String,
    remote_id_field: String,
    payload_field: String,
}

impl HttpIdService {
    /// Create a client from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            network: NetworkManager::from_settings(settings)?,
            endpoint: settings.service.endpoint.clone(),
            remote_id_field: settings.service.remote_id_field.clone(),
            payload_field: settings.service.payload_field.clone(),
        })
    }

    async fn call(&self, options: RequestOptions) -> Result<String> {
        let response = self.network.perform_request(&self.endpoint, &options).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::service(
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed"),
            ));
        }

        let body = response.text().await.map_err(|e| {
            crate::Error::network(format!("Failed to read response body: {}", e))
        })?;

        parse_remote_id(&body, &self.remote_id_field)
    }
}

#[async_trait::async_trait]
impl IdService for HttpIdService {
    async fn fetch_id(&self) -> Result<String> {
        tracing::debug!("Requesting a new shared id from {}", self.endpoint);
        self.call(RequestOptions::get()).await
    }

    async fn sync_id(&self, stored_id: &str) -> Result<String> {
        tracing::debug!("Syncing shared id {} with {}", stored_id, self.endpoint);

        let mut payload = serde_json::Map::new();
        payload.insert(self.payload_field.clone(), json!(stored_id));

        self.call(RequestOptions::post_json(serde_json::Value::Object(payload)))
            .await
    }
}

/// Extract the remote id from a response body.
///
/// The body must be a JSON object with a non-empty string under `field`.
pub fn parse_remote_id(body: &str, field: &str) -> Result<String> {
    if body.trim().is_empty() {
        return Err(crate::Error::validation("body", "empty response body"));
    }

    let value: serde_json::Value = serde_json::from_str(body)?;

    match value.get(field) {
        Some(serde_json::Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(serde_json::Value::String(_)) => {
            Err(crate::Error::validation(field, "remote id is empty"))
        }
        Some(other) => Err(crate::Error::validation_with_value(
            field.to_string(),
            "remote id is not a string".to_string(),
            other.to_string(),
        )),
        None => Err(crate::Error::validation(field, "remote id missing from response")),
    }
}
