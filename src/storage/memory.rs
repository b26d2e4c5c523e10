//! In-memory cookie store

use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Cookie, CookieStore};
use crate::Result;

/// Cookie store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<HashMap<String, Cookie>>,
}

impl MemoryCookieStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Full cookie entry, including its expiry
    pub async fn entry(&self, name: &str) -> Option<Cookie> {
        self.cookies.read().await.get(name).cloned()
    }

    /// Number of stored cookies, expired ones included
    pub async fn len(&self) -> usize {
        self.cookies.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.cookies.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl CookieStore for MemoryCookieStore {
    async fn set_cookie(&self, name: &str, value: &str, ttl_days: u32) -> Result<()> {
        self.cookies
            .write()
            .await
            .insert(name.to_string(), Cookie::new(value, ttl_days));
        Ok(())
    }

    async fn get_cookie(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .cookies
            .read()
            .await
            .get(name)
            .filter(|cookie| !cookie.is_expired())
            .map(|cookie| cookie.value.clone()))
    }
}
