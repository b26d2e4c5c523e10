//! Configuration management for the SharedId provider
//!
//! This module handles loading and managing configuration settings for the
//! identity service client, record storage and logging.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{
    DEFAULT_ENDPOINT, LoggingSettings, NetworkSettings, ServiceSettings, Settings,
    StorageSettings,
};

/// Serializes tests that touch process-wide environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
