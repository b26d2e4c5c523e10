//! Configuration loading
//!
//! Settings are layered: built-in defaults, then the TOML file, then the
//! environment. Command line flags are applied by the caller last.

use crate::{Result, config::Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
const CONFIG_ENV: &str = "SHAREDID_CONFIG";

/// Layered settings loader
#[derive(Debug)]
pub struct ConfigLoader {
    defaults: Settings,
}

impl ConfigLoader {
    /// Loader starting from the built-in defaults
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Locate the config file.
    ///
    /// `SHAREDID_CONFIG` wins when it names an existing file, otherwise
    /// `<config_dir>/sharedid-provider/config.toml` is used if present.
    pub fn get_config_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            let explicit = PathBuf::from(explicit);
            if explicit.exists() {
                debug!("{} selects {:?}", CONFIG_ENV, explicit);
                return Some(explicit);
            }
            warn!("{} names a missing file {:?}, ignoring it", CONFIG_ENV, explicit);
        }

        let fallback = dirs::config_dir()?
            .join("sharedid-provider")
            .join("config.toml");
        if fallback.exists() {
            debug!("Found config file at {:?}", fallback);
            Some(fallback)
        } else {
            debug!("No config file found");
            None
        }
    }

    /// Build validated settings from defaults, `config_file` (if it exists)
    /// and the environment
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        let base = match config_file {
            Some(path) if path.exists() => {
                info!("Reading configuration from {:?}", path);
                Settings::from_file(path)?
            }
            Some(path) => {
                warn!("Config file {:?} not found, continuing with defaults", path);
                self.defaults.clone()
            }
            None => self.defaults.clone(),
        };

        let settings = base.merge_with_env()?;
        settings.validate()?;
        debug!("Effective configuration: {:?}", settings);

        Ok(settings)
    }

}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_TEST_MUTEX;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[service]
endpoint = "http://localhost:8080/id"
remote_id_field = "uid"

[storage]
cookie_name = "_sid"
        "#
        )
        .unwrap();

        let loader = ConfigLoader::new();
        let settings = loader.load(Some(temp_file.path())).unwrap();

        assert_eq!(settings.service.endpoint, "http://localhost:8080/id");
        assert_eq!(settings.service.remote_id_field, "uid");
        assert_eq!(settings.storage.cookie_name, "_sid");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let loader = ConfigLoader::new();
        let settings = loader
            .load(Some(Path::new("/nonexistent/sharedid/config.toml")))
            .unwrap();
        assert_eq!(settings.storage.cookie_name, "sharedid");
    }

    #[test]
    fn test_invalid_file_rejected() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[service]
endpoint = "not-a-url"
        "#
        )
        .unwrap();

        let loader = ConfigLoader::new();
        assert!(loader.load(Some(temp_file.path())).is_err());
    }

    #[test]
    fn test_env_var_override() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let original = std::env::var("SHAREDID_ENDPOINT").ok();

        unsafe {
            std::env::set_var("SHAREDID_ENDPOINT", "http://127.0.0.1:7000/id");
        }

        let loader = ConfigLoader::new();
        let result = loader.load(None);

        unsafe {
            std::env::remove_var("SHAREDID_ENDPOINT");
            if let Some(endpoint) = original {
                std::env::set_var("SHAREDID_ENDPOINT", endpoint);
            }
        }

        assert_eq!(result.unwrap().service.endpoint, "http://127.0.0.1:7000/id");
    }
}
