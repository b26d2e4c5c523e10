//! Acquire mode CLI logic
//!
//! Reads the stored identity record, runs `get_id` when there is none and
//! `extend_id` otherwise, persists the outcome and prints the decoded ids.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    Settings,
    config::ConfigLoader,
    registry::SubmoduleRegistry,
    storage::{CookieStore, FileCookieStore, get_store_path},
    submodule::{IdSubmodule, MODULE_NAME, SharedIdSubmodule},
    types::IdentityRecord,
    utils::version,
};

/// Arguments for acquire mode
#[derive(Debug, Default)]
pub struct AcquireArgs {
    pub endpoint: Option<String>,
    pub store: Option<PathBuf>,
    pub cookie_name: Option<String>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

/// Run acquire mode with the given arguments
pub async fn run_acquire_mode(args: AcquireArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    super::init_logging(&settings);

    debug!("sharedid v{} starting", version::get_version());

    let store_path = match &settings.storage.store_path {
        Some(path) => path.clone(),
        None => get_store_path()?,
    };
    let store: Arc<dyn CookieStore> = Arc::new(FileCookieStore::new(store_path));

    let mut registry = SubmoduleRegistry::new();
    SharedIdSubmodule::from_settings(&settings, Arc::clone(&store))?.register(&mut registry)?;
    let submodule = registry
        .get(MODULE_NAME)
        .context("SharedId submodule missing from registry")?;

    let record = acquire(submodule.as_ref(), store.as_ref(), &settings).await?;

    store
        .set_cookie(
            &settings.storage.cookie_name,
            &record.to_cookie_value()?,
            settings.storage.expires_days,
        )
        .await?;
    info!(
        "Stored shared id {} in cookie '{}'",
        record.id(),
        settings.storage.cookie_name
    );

    let decoded = submodule
        .decode(Some(&record.to_value()))
        .unwrap_or_else(|| serde_json::json!({}));
    println!("{}", serde_json::to_string(&decoded)?);

    Ok(())
}

/// Run the id operation matching what is currently stored
pub async fn acquire(
    submodule: &dyn IdSubmodule,
    store: &dyn CookieStore,
    settings: &Settings,
) -> Result<IdentityRecord> {
    let stored = read_stored_record(store, &settings.storage.cookie_name).await;

    let response = match &stored {
        Some(record) => submodule.extend_id(&settings.params, record),
        None => submodule.get_id(&settings.params).await,
    };

    let record = response
        .resolve()
        .await
        .or(stored)
        .context("id operation returned neither a record nor a callback")?;

    Ok(record)
}

async fn read_stored_record(store: &dyn CookieStore, cookie_name: &str) -> Option<IdentityRecord> {
    let value = match store.get_cookie(cookie_name).await {
        Ok(value) => value?,
        Err(e) => {
            warn!(
                "Failed to read stored id: {}",
                crate::error::format_error_for_logging(&e)
            );
            return None;
        }
    };

    let record = IdentityRecord::from_cookie_value(&value);
    if record.is_none() {
        warn!("Ignoring invalid stored id '{}'", value);
    }
    record
}

fn load_settings(args: &AcquireArgs) -> Result<Settings> {
    let config_path = args.config.clone().or_else(ConfigLoader::get_config_path);

    let mut settings = ConfigLoader::new()
        .load(config_path.as_deref())
        .context("Failed to load configuration")?;

    // CLI arguments have the highest priority
    if let Some(endpoint) = &args.endpoint {
        settings.service.endpoint = endpoint.clone();
    }
    if let Some(store) = &args.store {
        settings.storage.store_path = Some(store.clone());
    }
    if let Some(cookie_name) = &args.cookie_name {
        settings.params.cookie_name = Some(cookie_name.clone());
    }
    if args.verbose {
        settings.logging.verbose = true;
    }

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCookieStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup(server: &MockServer) -> (Arc<dyn IdSubmodule>, Arc<MemoryCookieStore>, Settings) {
        let mut settings = Settings::default();
        settings.service.endpoint = format!("{}/id", server.uri());

        let store = Arc::new(MemoryCookieStore::new());
        let submodule: Arc<dyn IdSubmodule> =
            Arc::new(SharedIdSubmodule::from_settings(&settings, store.clone()).unwrap());
        (submodule, store, settings)
    }

    #[tokio::test]
    async fn test_acquire_without_stored_record_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sharedId": "r1"})))
            .expect(1)
            .mount(&server)
            .await;

        let (submodule, store, settings) = setup(&server).await;
        let record = acquire(submodule.as_ref(), store.as_ref(), &settings)
            .await
            .unwrap();
        assert_eq!(record.id(), "r1");
        assert!(!record.needs_sync());
    }

    #[tokio::test]
    async fn test_acquire_with_confirmed_record_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (submodule, store, settings) = setup(&server).await;
        store
            .set_cookie("sharedid", r#"{"id":"kept"}"#, 28)
            .await
            .unwrap();

        let record = acquire(submodule.as_ref(), store.as_ref(), &settings)
            .await
            .unwrap();
        assert_eq!(record.id(), "kept");
    }

    #[tokio::test]
    async fn test_invalid_stored_record_treated_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sharedId": "r2"})))
            .expect(1)
            .mount(&server)
            .await;

        let (submodule, store, settings) = setup(&server).await;
        store.set_cookie("sharedid", "garbage", 28).await.unwrap();

        let record = acquire(submodule.as_ref(), store.as_ref(), &settings)
            .await
            .unwrap();
        assert_eq!(record.id(), "r2");
    }

    #[tokio::test]
    async fn test_stored_record_read_like_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sharedId": "new"})))
            .expect(0)
            .mount(&server)
            .await;

        let (submodule, store, settings) = setup(&server).await;
        let stored = r#"{"id":"abc","ns":"yes"}"#;
        store.set_cookie("sharedid", stored, 28).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(stored).unwrap();
        let decoded = submodule.decode(Some(&value));
        assert_eq!(decoded, Some(json!({"sharedid": {"first": "abc"}})));

        let record = acquire(submodule.as_ref(), store.as_ref(), &settings)
            .await
            .unwrap();
        assert_eq!(record, IdentityRecord::confirmed("abc").unwrap());
    }

    #[test]
    fn test_cli_overrides_win() {
        let _lock = crate::config::ENV_TEST_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner());

        let args = AcquireArgs {
            endpoint: Some("http://127.0.0.1:9/id".to_string()),
            store: Some(PathBuf::from("/tmp/sharedid-test/cookies.json")),
            cookie_name: Some("_pubcid".to_string()),
            config: Some(PathBuf::from("/nonexistent/config.toml")),
            verbose: true,
        };

        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.service.endpoint, "http://127.0.0.1:9/id");
        assert_eq!(
            settings.storage.store_path,
            Some(PathBuf::from("/tmp/sharedid-test/cookies.json"))
        );
        assert_eq!(settings.params.cookie_name.as_deref(), Some("_pubcid"));
        assert!(settings.logging.verbose);
    }
}
