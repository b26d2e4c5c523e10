//! Identity record definition
//!
//! The value this module produces and consumes. Its persisted JSON form is
//! `{"id": "...", "ns": true}`, with `ns` omitted once the id has been
//! confirmed by the identity service.

use serde::Serialize;

/// Persisted shared identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    /// The shared identifier, never empty
    id: String,

    /// Set when the id was generated locally and still has to be synced
    #[serde(rename = "ns", skip_serializing_if = "std::ops::Not::not")]
    needs_sync: bool,
}

impl IdentityRecord {
    /// Record for an id confirmed by the identity service
    pub fn confirmed(id: impl Into<String>) -> crate::Result<Self> {
        Self::build(id.into(), false)
    }

    /// Record for a locally generated id that still needs a sync
    pub fn local(id: impl Into<String>) -> crate::Result<Self> {
        Self::build(id.into(), true)
    }

    /// Local record backed by a fresh ULID
    pub fn new_local() -> Self {
        Self {
            id: crate::id::generate(),
            needs_sync: true,
        }
    }

    fn build(id: String, needs_sync: bool) -> crate::Result<Self> {
        if id.is_empty() {
            return Err(crate::Error::validation("id", "identifier must not be empty"));
        }
        Ok(Self { id, needs_sync })
    }

    /// The shared identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the id was never confirmed by the identity service
    pub fn needs_sync(&self) -> bool {
        self.needs_sync
    }

    /// Lenient read of a stored value.
    ///
    /// Anything that is not an object with a non-empty string `id` yields
    /// `None`. `ns` only counts when it is the boolean `true`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let id = value.get("id")?.as_str()?;
        let needs_sync = value
            .get("ns")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        Self::build(id.to_string(), needs_sync).ok()
    }

    /// JSON value form of the record
    pub fn to_value(&self) -> serde_json::Value {
        let mut value = serde_json::json!({ "id": self.id });
        if self.needs_sync {
            value["ns"] = serde_json::Value::Bool(true);
        }
        value
    }

    /// Serialize for storage in a cookie
    pub fn to_cookie_value(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read a stored cookie value with the same rules as [`IdentityRecord::from_value`]
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(value).ok()?;
        Self::from_value(&value)
    }
}
