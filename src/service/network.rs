//! HTTP client setup
//!
//! Builds the `reqwest` client used for the identity service and sends
//! single requests through it. There are no retries: a failed call is
//! handled by the submodule's fallback path.

use reqwest::{Client, Method, Proxy};
use std::time::Duration;

use crate::Result;
use crate::config::Settings;

/// Owner of the HTTP client
#[derive(Debug, Clone)]
pub struct NetworkManager {
    client: Client,
}

impl NetworkManager {
    /// Create a network manager from settings.
    ///
    /// With `with_credentials` set the client keeps a cookie store, so
    /// cookies set by the identity service are sent back on later calls.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let builder = Client::builder()
            .user_agent(settings.service.user_agent.as_str())
            .timeout(settings.service.timeout)
            .connect_timeout(Duration::from_secs(settings.network.connect_timeout))
            .cookie_store(settings.service.with_credentials);

        Self::build(builder, settings.get_proxy_url().as_deref())
    }

    fn build(mut builder: reqwest::ClientBuilder, proxy_url: Option<&str>) -> Result<Self> {
        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                crate::Error::config("proxy", &format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Send one request and return the raw response, whatever its status
    pub async fn perform_request(
        &self,
        url: &str,
        request: &RequestOptions,
    ) -> Result<reqwest::Response> {
        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        builder.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", request.method, url, e);
            crate::Error::network(format!("HTTP request failed: {}", e))
        })
    }
}

/// A single request to the identity service
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// JSON body, sent with `Content-Type: application/json`
    pub json: Option<serde_json::Value>,
}

impl RequestOptions {
    /// Bodyless GET
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            json: None,
        }
    }

    /// POST with a JSON body
    pub fn post_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            json: Some(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_constructors() {
        let get = RequestOptions::get();
        assert_eq!(get.method, Method::GET);
        assert!(get.json.is_none());

        let post = RequestOptions::post_json(json!({"sharedId": "abc"}));
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.json, Some(json!({"sharedId": "abc"})));
    }

    #[tokio::test]
    async fn test_network_manager_creation() {
        assert!(NetworkManager::from_settings(&Settings::default()).is_ok());
    }

    #[tokio::test]
    async fn test_settings_proxy_applied() {
        let mut settings = Settings::default();
        settings.network.https_proxy = Some("http://proxy.example.com:3128".to_string());
        assert!(NetworkManager::from_settings(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/id"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"sharedId": "abc"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let manager = NetworkManager::from_settings(&Settings::default()).unwrap();
        let response = manager
            .perform_request(
                &format!("{}/id", mock_server.uri()),
                &RequestOptions::post_json(json!({"sharedId": "abc"})),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let manager = NetworkManager::from_settings(&Settings::default()).unwrap();
        let response = manager
            .perform_request(&mock_server.uri(), &RequestOptions::get())
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 503);
    }
}
