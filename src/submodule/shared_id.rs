//! SharedId submodule
//!
//! Obtains a shared id from the identity service, falls back to a local
//! ULID when the service is unreachable or answers with garbage, and later
//! syncs such local ids back to the service.
//!
//! ```text
//! Unset ──get_id──► LocalFallback (ns) ──extend_id, sync ok──► RemoteConfirmed
//!   │                    ▲      │
//!   │                    └──────┘ extend_id, sync failed (unchanged)
//!   └──get_id──► RemoteConfirmed
//! ```

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{IdCallback, IdResponse, IdSubmodule};
use crate::{
    Result,
    config::Settings,
    id::{IdGenerator, UlidGenerator},
    registry::SubmoduleRegistry,
    service::{HttpIdService, IdService},
    storage::CookieStore,
    types::{ConfigParams, DecodedId, IdentityRecord},
};

/// Name the submodule registers under
pub const MODULE_NAME: &str = "sharedId";

/// Cookie the configured cookie name is persisted in
pub const COOKIE_NAME_KEY: &str = "sharedId_cn";

/// Lifetime of [`COOKIE_NAME_KEY`] in days
pub const COOKIE_NAME_TTL_DAYS: u32 = 365;

/// SharedId submodule talking to the HTTP identity service
pub type SharedIdSubmodule = SharedIdSubmoduleGeneric<HttpIdService>;

/// SharedId submodule over any identity service implementation
#[derive(Debug)]
pub struct SharedIdSubmoduleGeneric<S: IdService = HttpIdService> {
    /// Identity service used for minting and syncing
    service: Arc<S>,
    /// Storage collaborator, written once per `get_id`
    store: Arc<dyn CookieStore>,
    /// Fallback id source
    generator: Arc<dyn IdGenerator>,
}

impl SharedIdSubmoduleGeneric<HttpIdService> {
    /// Build the submodule with an HTTP identity service configured from settings
    pub fn from_settings(settings: &Settings, store: Arc<dyn CookieStore>) -> Result<Self> {
        Ok(Self::new(HttpIdService::from_settings(settings)?, store))
    }
}

impl<S: IdService + 'static> SharedIdSubmoduleGeneric<S> {
    /// Create the submodule with the ULID fallback generator
    pub fn new(service: S, store: Arc<dyn CookieStore>) -> Self {
        Self {
            service: Arc::new(service),
            store,
            generator: Arc::new(UlidGenerator),
        }
    }

    /// Replace the fallback id generator
    pub fn with_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Register this submodule with a host registry under [`MODULE_NAME`]
    pub fn register(self, registry: &mut SubmoduleRegistry) -> Result<()> {
        registry.register(Arc::new(self))
    }

    /// Decode a typed record
    pub fn decode_record(&self, record: &IdentityRecord) -> DecodedId {
        DecodedId::from_record(record)
    }

    async fn persist_cookie_name(&self, params: &ConfigParams) {
        let Some(cookie_name) = params.cookie_name.as_deref() else {
            debug!("SharedId: no cookie name configured, nothing to persist");
            return;
        };

        if let Err(e) = self
            .store
            .set_cookie(COOKIE_NAME_KEY, cookie_name, COOKIE_NAME_TTL_DAYS)
            .await
        {
            warn!(
                "SharedId: failed to persist cookie name: {}",
                crate::error::format_error(&e)
            );
        }
    }
}

#[async_trait::async_trait]
impl<S: IdService + 'static> IdSubmodule for SharedIdSubmoduleGeneric<S> {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn decode(&self, stored: Option<&serde_json::Value>) -> Option<serde_json::Value> {
        let record = IdentityRecord::from_value(stored?)?;
        let decoded = self.decode_record(&record).to_value();
        debug!("SharedId: decoded value {}", decoded);
        Some(decoded)
    }

    async fn get_id(&self, params: &ConfigParams) -> IdResponse {
        self.persist_cookie_name(params).await;

        info!("SharedId: no stored id, requesting a new one");
        let service = Arc::clone(&self.service);
        let generator = Arc::clone(&self.generator);
        IdResponse::with_callback(IdCallback::new(acquire_id(service, generator)))
    }

    fn extend_id(&self, _params: &ConfigParams, stored: &IdentityRecord) -> IdResponse {
        debug!("SharedId: existing shared id {}", stored.id());

        if !stored.needs_sync() {
            return IdResponse::unchanged(stored.clone());
        }

        info!("SharedId: existing shared id {} is not synced", stored.id());
        let service = Arc::clone(&self.service);
        IdResponse::with_callback(IdCallback::new(reconcile_id(service, stored.clone())))
    }
}

/// GET a fresh id; any failure degrades to a local fallback id
async fn acquire_id<S: IdService>(
    service: Arc<S>,
    generator: Arc<dyn IdGenerator>,
) -> IdentityRecord {
    match service.fetch_id().await.and_then(IdentityRecord::confirmed) {
        Ok(record) => {
            info!("SharedId: generated shared id {}", record.id());
            record
        }
        Err(e) => {
            warn!(
                "SharedId: id service unavailable ({}), generating locally",
                crate::error::format_error(&e)
            );
            let record = local_fallback(generator.as_ref());
            info!("SharedId: ULID generated shared id {}", record.id());
            record
        }
    }
}

/// POST a local id; any failure keeps the stored record
async fn reconcile_id<S: IdService>(service: Arc<S>, stored: IdentityRecord) -> IdentityRecord {
    debug!("SharedId: id to be synced {}", stored.id());

    match service
        .sync_id(stored.id())
        .await
        .and_then(IdentityRecord::confirmed)
    {
        Ok(confirmed) => {
            info!(
                "SharedId: older shared id {} synced as {}",
                stored.id(),
                confirmed.id()
            );
            confirmed
        }
        Err(e) => {
            info!(
                "SharedId: sync error for id {}: {}",
                stored.id(),
                crate::error::format_error(&e)
            );
            stored
        }
    }
}

fn local_fallback(generator: &dyn IdGenerator) -> IdentityRecord {
    IdentityRecord::local(generator.generate()).unwrap_or_else(|e| {
        warn!("SharedId: fallback generator produced an unusable id: {}", e);
        IdentityRecord::new_local()
    })
}
