//! Provider Adapter Factory
//! Creates the appropriate adapter based on provider name

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::gemini::GeminiAdapter;
use super::minimax::MinimaxAdapter;
use super::openai::OpenAICompatibleAdapter;
use super::traits::ProviderAdapter;
use super::wenxin::WenxinAdapter;
use crate::client::AiClient;
use crate::config::{AiConfig, ClientConfig};
use crate::error::Result;
use crate::providers::Provider;

fn build_adapter(provider: Provider) -> Arc<dyn ProviderAdapter> {
    match provider {
        Provider::Wenxin => Arc::new(WenxinAdapter::new()),
        Provider::Qianwen
        | Provider::Volcano
        | Provider::Deepseek
        | Provider::Hunyuan
        | Provider::Zhipu
        | Provider::Moonshot => Arc::new(OpenAICompatibleAdapter::new(provider.as_str())),
        Provider::Gemini => Arc::new(GeminiAdapter::new()),
        Provider::Minmax => Arc::new(MinimaxAdapter::new()),
    }
}

// Adapters are stateless, so one shared instance per provider is enough
static ADAPTER_CACHE: Lazy<HashMap<Provider, Arc<dyn ProviderAdapter>>> = Lazy::new(|| {
    Provider::ALL
        .into_iter()
        .map(|provider| (provider, build_adapter(provider)))
        .collect()
});

/// Get provider adapter instance
/// Returns the cached adapter for the specified provider
pub fn get_provider_adapter(provider: Provider) -> Arc<dyn ProviderAdapter> {
    // The cache holds every `Provider::ALL` entry
    Arc::clone(&ADAPTER_CACHE[&provider])
}

/// Entry point for building clients by provider name
pub struct AiClientFactory;

impl AiClientFactory {
    /// Build a client for `provider` (case-insensitive). An empty
    /// `config.provider` is filled with the resolved name.
    pub fn create(provider: &str, mut config: ClientConfig) -> Result<AiClient> {
        let provider: Provider = provider.parse()?;
        if config.provider.is_empty() {
            config.provider = provider.as_str().to_string();
        }
        debug!(provider = %provider, model = %config.model, "creating AI client");
        AiClient::new(get_provider_adapter(provider), config)
    }

    /// Build the client for the configured default provider
    pub fn create_default(config: &AiConfig) -> Result<AiClient> {
        Self::create(&config.default, config.provider_config(&config.default))
    }

    /// Supported provider names, in registration order
    pub fn supported_providers() -> Vec<&'static str> {
        crate::providers::supported_providers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;

    #[test]
    fn every_provider_round_trips_through_model_info() {
        for name in AiClientFactory::supported_providers() {
            let config = ClientConfig::new(name, "key").model("m");
            let client = AiClientFactory::create(name, config).unwrap();
            assert_eq!(client.model_info().provider, name);
            assert_eq!(client.adapter().provider_name(), name);
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = AiClientFactory::create("unknown-vendor", ClientConfig::default()).unwrap_err();
        assert!(matches!(err, AiError::UnsupportedProvider(name) if name == "unknown-vendor"));
    }

    #[test]
    fn provider_name_is_case_insensitive() {
        let client = AiClientFactory::create("DeepSeek", ClientConfig::default()).unwrap();
        assert_eq!(client.model_info().provider, "deepseek");
    }

    #[test]
    fn every_provider_has_a_cached_adapter() {
        for provider in Provider::ALL {
            let first = get_provider_adapter(provider);
            assert_eq!(first.provider_name(), provider.as_str());
            assert!(Arc::ptr_eq(&first, &get_provider_adapter(provider)));
        }
    }

    #[test]
    fn supported_order_is_stable() {
        assert_eq!(
            AiClientFactory::supported_providers(),
            vec![
                "wenxin", "qianwen", "volcano", "deepseek", "hunyuan", "zhipu", "moonshot",
                "gemini", "minmax"
            ]
        );
    }

    #[test]
    fn create_default_uses_configured_provider() {
        let config = AiConfig::from_toml_str(
            "default = \"Gemini\"\n[providers.gemini]\napi_key = \"g\"\nmodel = \"gemini-pro\"\n",
        )
        .unwrap();
        let client = AiClientFactory::create_default(&config).unwrap();
        assert_eq!(client.model_info().provider, "gemini");
        assert_eq!(client.model_info().name, "gemini-pro");
    }
}
