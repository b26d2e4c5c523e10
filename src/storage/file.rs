//! File-backed cookie store
//!
//! Cookies are kept in a single JSON file mapping cookie names to
//! `{"value": ..., "expiresAt": ...}`. The file is read and rewritten on
//! every write; expired entries are dropped on load.

use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::{Cookie, CookieStore};
use crate::Result;

type CookieMap = HashMap<String, Cookie>;

/// File-based cookie store
#[derive(Debug)]
pub struct FileCookieStore {
    /// Path to the cookie file
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileCookieStore {
    /// Create a store backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Load all live cookies from the file
    async fn load(&self) -> CookieMap {
        if !self.path.exists() {
            debug!("Cookie file does not exist: {:?}", self.path);
            return CookieMap::new();
        }

        match fs::read_to_string(&self.path).await {
            Ok(content) => parse_cookie_content(&content),
            Err(e) => {
                warn!("Failed to read cookie file {:?}: {}", self.path, e);
                CookieMap::new()
            }
        }
    }

    /// Write all cookies back to the file
    async fn save(&self, cookies: &CookieMap) -> Result<()> {
        let content = serde_json::to_string_pretty(cookies)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(parent).await
        {
            error!("Failed to create cookie directory {:?}: {}", parent, e);
            return Err(crate::Error::storage(
                "directory_creation",
                &format!("Directory creation failed: {}", e),
            ));
        }

        match fs::write(&self.path, content).await {
            Ok(_) => {
                debug!("Cookies saved to: {:?}", self.path);
                Ok(())
            }
            Err(e) => {
                error!("Failed to write cookie file {:?}: {}", self.path, e);
                Err(crate::Error::storage(
                    "file_write",
                    &format!("Write failed: {}", e),
                ))
            }
        }
    }
}

fn parse_cookie_content(content: &str) -> CookieMap {
    let cookies: CookieMap = match serde_json::from_str(content) {
        Ok(cookies) => cookies,
        Err(e) => {
            warn!("Error parsing cookie file: {}", e);
            return CookieMap::new();
        }
    };

    let live: CookieMap = cookies
        .into_iter()
        .filter(|(name, cookie)| {
            if cookie.is_expired() {
                debug!("Dropping expired cookie '{}'", name);
                false
            } else {
                true
            }
        })
        .collect();

    debug!("Loaded {} cookies", live.len());
    live
}

#[async_trait::async_trait]
impl CookieStore for FileCookieStore {
    async fn set_cookie(&self, name: &str, value: &str, ttl_days: u32) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut cookies = self.load().await;
        cookies.insert(name.to_string(), Cookie::new(value, ttl_days));
        self.save(&cookies).await
    }

    async fn get_cookie(&self, name: &str) -> Result<Option<String>> {
        Ok(self.load().await.remove(name).map(|cookie| cookie.value))
    }
}

/// Get the cookie file path following the XDG Base Directory Specification
pub fn get_store_path() -> anyhow::Result<PathBuf> {
    let data_dir = if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("sharedid-provider")
    } else if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("sharedid-provider")
    } else {
        warn!("Could not determine data directory, using current directory for cookies");
        std::env::current_dir()?.join(".sharedid")
    };

    Ok(data_dir.join("cookies.json"))
}
