//! Providers module
//! Centralized provider management for AI models

pub mod adapters;
pub mod constants;

use std::fmt;
use std::str::FromStr;

use crate::error::AiError;

pub use constants::{get_default_endpoint, get_default_model, get_provider_config, ProviderConfig};

/// All supported providers, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Wenxin,
    Qianwen,
    Volcano,
    Deepseek,
    Hunyuan,
    Zhipu,
    Moonshot,
    Gemini,
    Minmax,
}

impl Provider {
    pub const ALL: [Provider; 9] = [
        Provider::Wenxin,
        Provider::Qianwen,
        Provider::Volcano,
        Provider::Deepseek,
        Provider::Hunyuan,
        Provider::Zhipu,
        Provider::Moonshot,
        Provider::Gemini,
        Provider::Minmax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Wenxin => "wenxin",
            Provider::Qianwen => "qianwen",
            Provider::Volcano => "volcano",
            Provider::Deepseek => "deepseek",
            Provider::Hunyuan => "hunyuan",
            Provider::Zhipu => "zhipu",
            Provider::Moonshot => "moonshot",
            Provider::Gemini => "gemini",
            Provider::Minmax => "minmax",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AiError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or(AiError::UnsupportedProvider(normalized))
    }
}

/// All supported provider names
pub fn supported_providers() -> Vec<&'static str> {
    Provider::ALL.iter().map(Provider::as_str).collect()
}

/// Resolve the endpoint for a provider
/// A non-empty custom endpoint always wins over the built-in default
pub fn resolve_endpoint(provider: &str, custom: Option<&str>) -> Option<String> {
    match custom.map(str::trim) {
        Some(url) if !url.is_empty() => Some(url.to_string()),
        _ => get_default_endpoint(provider).map(|s| s.to_string()),
    }
}
