//! Provider Adapter Traits
//! Defines the interface for all provider adapters

use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{AiError, Result};
use crate::providers::{get_provider_config, resolve_endpoint, ProviderConfig};
use crate::types::{ChatOptions, ChatResult};

/// How the API key reaches the vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <api_key>`
    Bearer,
    /// `?key=<api_key>` on the endpoint URL
    QueryKey,
}

/// Provider adapter trait
/// All provider adapters must implement this trait. Adapters hold no
/// per-client state; everything instance-specific arrives through
/// [`ClientConfig`].
pub trait ProviderAdapter: Send + Sync {
    /// Get provider name
    fn provider_name(&self) -> &str;

    /// Get built-in defaults for this provider
    fn config(&self) -> ProviderConfig {
        get_provider_config(self.provider_name())
    }

    fn auth_style(&self) -> AuthStyle {
        AuthStyle::Bearer
    }

    /// Resolve the chat endpoint: explicit config first, then the built-in default
    fn endpoint(&self, config: &ClientConfig) -> Result<Url> {
        let raw = resolve_endpoint(self.provider_name(), config.endpoint.as_deref()).ok_or_else(|| {
            AiError::Config(format!("No endpoint configured for {}", self.provider_name()))
        })?;
        parse_endpoint(&raw)
    }

    /// Endpoint used for streaming calls
    fn stream_endpoint(&self, config: &ClientConfig) -> Result<Url> {
        self.endpoint(config)
    }

    /// Build the default vendor request body
    fn build_request(&self, prompt: &str, options: &ChatOptions, config: &ClientConfig) -> Value;

    /// Flag a request body for streaming delivery
    fn mark_streaming(&self, body: &mut Value) {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("stream".to_string(), Value::Bool(true));
        }
    }

    /// Map the vendor response onto [`ChatResult`]. Must be pure.
    fn parse_response(&self, response: &Value, config: &ClientConfig) -> ChatResult;

    /// Build an image-generation request body
    fn image_request(
        &self,
        _prompt: &str,
        _options: &ChatOptions,
        _config: &ClientConfig,
    ) -> Result<Value> {
        Err(AiError::UnsupportedOperation(format!(
            "Image generation not supported by {}",
            self.provider_name()
        )))
    }
}

pub(crate) fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| AiError::Config(format!("Invalid endpoint '{raw}': {e}")))
}
