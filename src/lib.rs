//! SharedId Provider
//!
//! A user-id submodule that obtains, syncs and decodes a shared browser
//! identifier for an advertising-bid pipeline.
//!
//! # Features
//!
//! - **Remote ids**: a new id is minted by the identity service (`GET`)
//! - **Local fallback**: when the service fails, a sortable ULID is generated
//!   locally and flagged as needing a sync
//! - **Sync**: flagged ids are submitted to the service (`POST`) on the next
//!   run and replaced by the id it confirms
//! - **Decode**: stored records become `{"sharedid": {"first", "third"}}`
//!   mappings for bid requests
//!
//! # Architecture
//!
//! - [`submodule`]: the `decode` / `get_id` / `extend_id` operations
//! - [`service`]: HTTP access to the identity service
//! - [`id`]: local ULID generation
//! - [`storage`]: the cookie store collaborator
//! - [`registry`]: explicit host-side registration of submodules
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use sharedid_provider::{
//!     Settings, SubmoduleRegistry,
//!     storage::MemoryCookieStore,
//!     submodule::{MODULE_NAME, SharedIdSubmodule},
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut registry = SubmoduleRegistry::new();
//! let store = Arc::new(MemoryCookieStore::new());
//! SharedIdSubmodule::from_settings(&Settings::default(), store)?.register(&mut registry)?;
//! assert!(registry.get(MODULE_NAME).is_some());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod id;
pub mod registry;
pub mod service;
pub mod storage;
pub mod submodule;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use registry::SubmoduleRegistry;
pub use submodule::{IdCallback, IdResponse, IdSubmodule, SharedIdSubmodule};
pub use types::{ConfigParams, DecodedId, IdentityRecord};
