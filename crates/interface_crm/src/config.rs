//! Client configuration

use serde::Deserialize;

/// CRM client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    /// Base URL of the case-management API
    pub api_base_url: String,
    /// OAuth token endpoint for client-credentials exchange
    pub auth_endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.crm.example.com".to_string(),
            auth_endpoint: "https://auth.example.com/oauth/token".to_string(),
            timeout_secs: 30,
        }
    }
}

impl CrmConfig {
    /// Loads configuration from `CRM_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CRM"))
            .build()?
            .try_deserialize()
    }

    /// Returns the URL of an API endpoint under the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrmConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_base_url.starts_with("https://"));
    }

    #[test]
    fn test_endpoint_joining() {
        let config = CrmConfig {
            api_base_url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint("upload"), "https://api.example.com/upload");
        assert_eq!(config.endpoint("case"), "https://api.example.com/case");
    }
}
