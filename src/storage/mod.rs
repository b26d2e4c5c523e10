//! Cookie storage collaborator
//!
//! The submodule only ever writes one cookie through this trait (the
//! configured cookie name). Reading the persisted identity record back is
//! the host's business, which is why [`CookieStore::get_cookie`] exists.

pub mod file;
pub mod memory;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

pub use file::{FileCookieStore, get_store_path};
pub use memory::MemoryCookieStore;

/// A stored cookie value with its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie value
    pub value: String,
    /// Expiration timestamp
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl Cookie {
    /// Cookie expiring `ttl_days` from now
    pub fn new(value: impl Into<String>, ttl_days: u32) -> Self {
        Self {
            value: value.into(),
            expires_at: Utc::now() + Duration::days(i64::from(ttl_days)),
        }
    }

    /// Check if the cookie has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Storage the submodule and its host persist cookies in
#[async_trait::async_trait]
pub trait CookieStore: Send + Sync + std::fmt::Debug {
    /// Store `value` under `name` for `ttl_days` days
    async fn set_cookie(&self, name: &str, value: &str, ttl_days: u32) -> Result<()>;

    /// Read a cookie; expired cookies read as absent
    async fn get_cookie(&self, name: &str) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_expiry() {
        let cookie = Cookie::new("value", 365);
        assert!(!cookie.is_expired());

        let expired = Cookie {
            value: "value".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        };
        assert!(expired.is_expired());
    }
}
