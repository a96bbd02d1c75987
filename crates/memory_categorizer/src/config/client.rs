//! Client configuration resolved from environment variables

use secrecy::SecretString;
use std::env;

use crate::error::{CategorizeError, Result};

/// Alternate provider key, checked first
pub const SILICONFLOW_API_KEY_ENV: &str = "SILICONFLOW_API_KEY";
/// Default provider key, used when the alternate key is absent
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Endpoint override honored for the default provider
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

pub const SILICONFLOW_BASE_URL: &str = "https://api.siliconflow.cn/v1";
pub const SILICONFLOW_MODEL: &str = "Pro/deepseek-ai/DeepSeek-V3.1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Which key source the configuration was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    SiliconFlow,
    OpenAi,
}

impl Provider {
    /// Get provider name string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiliconFlow => "siliconflow",
            Self::OpenAi => "openai",
        }
    }
}

/// Configuration for the categorization model client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: SecretString,
    /// `None` means the provider's default endpoint
    pub base_url: Option<String>,
    pub model_name: String,
    pub provider: Provider,
}

impl ClientConfig {
    /// Create a config for the default provider with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: None,
            model_name: DEFAULT_MODEL.to_string(),
            provider: Provider::OpenAi,
        }
    }

    /// Resolve configuration from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup
    ///
    /// The alternate provider key wins when present and switches both the
    /// endpoint and the model. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(SILICONFLOW_API_KEY_ENV) {
            return Ok(Self {
                api_key: SecretString::from(key),
                base_url: Some(SILICONFLOW_BASE_URL.to_string()),
                model_name: SILICONFLOW_MODEL.to_string(),
                provider: Provider::SiliconFlow,
            });
        }

        let key = get(OPENAI_API_KEY_ENV).ok_or(CategorizeError::MissingApiKey)?;
        Ok(Self {
            api_key: SecretString::from(key),
            base_url: get(OPENAI_BASE_URL_ENV),
            model_name: DEFAULT_MODEL.to_string(),
            provider: Provider::OpenAi,
        })
    }

    /// Set the endpoint base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the model name
    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_alternate_provider_wins() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SILICONFLOW_API_KEY", "sf-key"),
            ("OPENAI_API_KEY", "sk-key"),
        ]))
        .unwrap();

        assert_eq!(config.provider, Provider::SiliconFlow);
        assert_eq!(config.api_key.expose_secret(), "sf-key");
        assert_eq!(config.base_url.as_deref(), Some(SILICONFLOW_BASE_URL));
        assert_eq!(config.model_name, SILICONFLOW_MODEL);
    }

    #[test]
    fn test_default_provider_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-key")])).unwrap();

        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.api_key.expose_secret(), "sk-key");
        assert_eq!(config.base_url, None);
        assert_eq!(config.model_name, "gpt-4o-mini");
    }

    #[test]
    fn test_empty_alternate_key_is_unset() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SILICONFLOW_API_KEY", ""),
            ("OPENAI_API_KEY", "sk-key"),
        ]))
        .unwrap();

        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn test_openai_base_url_override() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-key"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.model_name, DEFAULT_MODEL);
    }

    #[test]
    fn test_base_url_override_ignored_for_alternate_provider() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SILICONFLOW_API_KEY", "sf-key"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some(SILICONFLOW_BASE_URL));
    }

    #[test]
    fn test_missing_key() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, CategorizeError::MissingApiKey));
    }

    #[test]
    fn test_builder_and_debug_redaction() {
        let config = ClientConfig::new("sk-secret")
            .with_base_url("http://custom:8080")
            .with_model("custom-model");

        assert_eq!(config.base_url.as_deref(), Some("http://custom:8080"));
        assert_eq!(config.model_name, "custom-model");
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }
}
