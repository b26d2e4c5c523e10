//! Host-side submodule registry
//!
//! Submodules are registered explicitly by the host instead of registering
//! themselves as a side effect of being loaded.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{Result, submodule::IdSubmodule};

/// Registry of user-id submodules keyed by name
#[derive(Default)]
pub struct SubmoduleRegistry {
    submodules: BTreeMap<&'static str, Arc<dyn IdSubmodule>>,
}

impl SubmoduleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a submodule; names must be unique
    pub fn register(&mut self, submodule: Arc<dyn IdSubmodule>) -> Result<()> {
        let name = submodule.name();
        if self.submodules.contains_key(name) {
            return Err(crate::Error::registry(name, "already registered"));
        }

        tracing::debug!("Registered user id submodule '{}'", name);
        self.submodules.insert(name, submodule);
        Ok(())
    }

    /// Look up a submodule by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn IdSubmodule>> {
        self.submodules.get(name).cloned()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.submodules.keys().copied()
    }

    /// Number of registered submodules
    pub fn len(&self) -> usize {
        self.submodules.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.submodules.is_empty()
    }
}

impl fmt::Debug for SubmoduleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmoduleRegistry")
            .field("submodules", &self.submodules.keys().collect::<Vec<_>>())
            .finish()
    }
}
