//! User-id submodules
//!
//! A submodule exposes exactly three operations to its host: decode a stored
//! value for bid requests, obtain a new id, and extend (refresh) an existing
//! one. The latter two hand back an [`IdResponse`] whose callback performs
//! any network work.

pub mod callback;
pub mod shared_id;

use crate::types::{ConfigParams, IdentityRecord};

pub use callback::{IdCallback, IdResponse};
pub use shared_id::{
    COOKIE_NAME_KEY, COOKIE_NAME_TTL_DAYS, MODULE_NAME, SharedIdSubmodule,
    SharedIdSubmoduleGeneric,
};

/// Interface between a user-id submodule and its host registry
#[async_trait::async_trait]
pub trait IdSubmodule: Send + Sync {
    /// Name the submodule is registered under
    fn name(&self) -> &'static str;

    /// Turn a stored value into the mapping passed to bid requests.
    ///
    /// Returns `None` for an absent or invalid value.
    fn decode(&self, stored: Option<&serde_json::Value>) -> Option<serde_json::Value>;

    /// Obtain an id when nothing is stored yet
    async fn get_id(&self, params: &ConfigParams) -> IdResponse;

    /// Refresh an existing id
    fn extend_id(&self, params: &ConfigParams, stored: &IdentityRecord) -> IdResponse;
}
