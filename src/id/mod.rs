//! Local fallback identifiers
//!
//! Used only when the identity service cannot mint an id. Identifiers are
//! ULIDs: 26 characters, URL-safe, and lexicographically sortable by
//! creation time. Within a process they are strictly increasing, even for
//! ids generated in the same millisecond.

use std::sync::{LazyLock, Mutex};
use ulid::{Generator, Ulid};

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::new()));

/// Source of fallback ids
pub trait IdGenerator: Send + Sync + std::fmt::Debug {
    /// Produce a new, non-empty, unique id
    fn generate(&self) -> String;
}

/// Process-wide monotonic ULID generator
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn generate(&self) -> String {
        generate()
    }
}

/// Generate a fresh, time-ordered ULID string
pub fn generate() -> String {
    let mut generator = GENERATOR.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    match generator.generate() {
        Ok(ulid) => ulid.to_string(),
        Err(e) => {
            // random part overflowed within a single millisecond
            tracing::warn!("Monotonic ULID generation failed ({}), using a fresh ULID", e);
            Ulid::new().to_string()
        }
    }
}
