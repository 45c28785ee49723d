//! Console configuration for reaching the CRM backend.

use crate::error::{WamError, WamResult};
use serde::{Deserialize, Serialize};

/// Connection settings for the CRM REST backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Backend base URL, e.g. `https://crm.example.com`.
    pub base_url: String,
    /// Bearer token of the signed-in console session.
    pub api_token: String,
    /// Tenant (company) scope for multi-tenant deployments.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Timeout in seconds for API calls.
    #[serde(default = "default_timeout")]
    pub timeout_sec: u32,
}

fn default_timeout() -> u32 {
    30
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_token: String::new(),
            tenant_id: None,
            timeout_sec: default_timeout(),
        }
    }
}

impl ConsoleConfig {
    /// Read configuration from `WAM_BASE_URL`, `WAM_API_TOKEN`,
    /// `WAM_TENANT_ID` and `WAM_TIMEOUT_SEC`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("WAM_BASE_URL") {
            if !v.trim().is_empty() {
                config.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("WAM_API_TOKEN") {
            config.api_token = v;
        }
        if let Ok(v) = std::env::var("WAM_TENANT_ID") {
            if !v.trim().is_empty() {
                config.tenant_id = Some(v.trim().to_string());
            }
        }
        if let Ok(v) = std::env::var("WAM_TIMEOUT_SEC") {
            if let Ok(n) = v.trim().parse::<u32>() {
                config.timeout_sec = n;
            }
        }
        config
    }

    /// Validate that the configuration can produce usable requests.
    pub fn validate(&self) -> WamResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(WamError::not_configured("Backend base URL is not set"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| WamError::not_configured(format!("Invalid backend URL: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConsoleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_sec, 30);
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = ConsoleConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let config = ConsoleConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
