//! Client configuration
//! Per-provider client settings plus the multi-provider file/env layout

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};
use crate::providers::constants::DEFAULT_TIMEOUT_SECS;
use crate::providers::{get_default_endpoint, get_default_model, supported_providers};

/// Provider used when neither the file nor `AI_DEFAULT` names one
pub const DEFAULT_PROVIDER: &str = "wenxin";

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings for one client instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Whole-call timeout in seconds; 0 disables it
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub provider: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            endpoint: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            provider: String::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(provider: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Configured model, or the provider default
    pub fn model_or_default(&self, provider: &str) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }
        get_default_model(provider).unwrap_or_default().to_string()
    }
}

/// Default provider plus one table per provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_provider")]
    pub default: String,
    #[serde(default)]
    pub providers: BTreeMap<String, ClientConfig>,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default: default_provider(),
            providers: BTreeMap::new(),
        }
    }
}

impl AiConfig {
    /// Reads `AI_DEFAULT` and `AI_<PROVIDER>_{API_KEY,MODEL,ENDPOINT,TIMEOUT}`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AiConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut providers = BTreeMap::new();
        for name in supported_providers() {
            let prefix = format!("AI_{}", name.to_uppercase());
            let timeout = match read(&format!("{prefix}_TIMEOUT")) {
                Some(raw) => raw.parse::<u64>().map_err(|err| {
                    AiError::Config(format!("{prefix}_TIMEOUT must be whole seconds, got '{raw}': {err}"))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            };

            providers.insert(
                name.to_string(),
                ClientConfig {
                    api_key: read(&format!("{prefix}_API_KEY")).unwrap_or_default(),
                    model: read(&format!("{prefix}_MODEL"))
                        .unwrap_or_else(|| get_default_model(name).unwrap_or_default().to_string()),
                    endpoint: read(&format!("{prefix}_ENDPOINT"))
                        .or_else(|| get_default_endpoint(name).map(str::to_string)),
                    timeout,
                    provider: name.to_string(),
                },
            );
        }

        Ok(Self {
            default: read("AI_DEFAULT").unwrap_or_else(default_provider),
            providers,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: AiConfig = toml::from_str(raw)
            .map_err(|err| AiError::Config(format!("Failed to parse config: {err}")))?;

        for (name, provider) in config.providers.iter_mut() {
            if provider.provider.is_empty() {
                provider.provider = name.clone();
            }
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            AiError::Config(format!("Failed to read config file '{}': {err}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// The named provider table, or an empty config tagged with that name
    pub fn provider_config(&self, name: &str) -> ClientConfig {
        let name = name.trim().to_lowercase();
        self.providers.get(&name).cloned().unwrap_or_else(|| ClientConfig {
            provider: name,
            ..ClientConfig::default()
        })
    }
}
