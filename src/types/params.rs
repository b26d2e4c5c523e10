//! Submodule parameters handed over by the host

use serde::{Deserialize, Serialize};

/// Per-submodule configuration params
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigParams {
    /// Cookie name the publisher configured for the shared id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

impl ConfigParams {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configured cookie name
    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = Some(cookie_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builder() {
        let params = ConfigParams::new().with_cookie_name("_pubcid");
        assert_eq!(params.cookie_name.as_deref(), Some("_pubcid"));
    }

    #[test]
    fn test_params_from_toml() {
        let params: ConfigParams = toml::from_str(r#"cookie_name = "_sharedid""#).unwrap();
        assert_eq!(params.cookie_name.as_deref(), Some("_sharedid"));

        let empty: ConfigParams = toml::from_str("").unwrap();
        assert!(empty.cookie_name.is_none());
    }
}
