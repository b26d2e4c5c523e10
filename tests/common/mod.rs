//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use serde_json::json;
use sharedid_provider::config::Settings;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test configuration factory
pub struct TestConfig;

impl TestConfig {
    /// Settings pointing at a mock identity service
    pub fn with_endpoint(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.service.endpoint = format!("{}/id", server.uri());
        settings.logging.level = "debug".to_string();
        settings
    }

    /// Settings pointing at an address nothing listens on
    pub fn unreachable() -> Settings {
        let mut settings = Settings::default();
        settings.service.endpoint = "http://127.0.0.1:1/id".to_string();
        settings.service.timeout = std::time::Duration::from_secs(2);
        settings
    }
}

/// Mock identity service factory
pub struct MockServerFactory;

impl MockServerFactory {
    /// Service that mints `id` on GET
    pub async fn minting(id: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sharedId": id })))
            .mount(&server)
            .await;
        server
    }

    /// Service that confirms every POST as `id`
    pub async fn confirming(id: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sharedId": id })))
            .mount(&server)
            .await;
        server
    }

    /// Service failing every request with `status`
    pub async fn failing(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(path("/id"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        server
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logger
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    }

    /// Whether `id` is a 26 character Crockford base32 ULID
    pub fn is_ulid(id: &str) -> bool {
        id.len() == 26 && ulid::Ulid::from_string(id).is_ok()
    }
}
