//! AI client handle
//! Binds one adapter to one config, one transport and optional override hooks

use std::fmt;
use std::sync::Arc;

use futures::{pin_mut, Stream, StreamExt};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::providers::adapters::{AuthStyle, ProviderAdapter};
use crate::transport::HttpTransport;
use crate::types::{ChatOptions, ChatResult, ModelInfo};

/// Replaces the adapter's default request mapping: `(prompt, options, config) -> body`
pub type RequestPreparationOverride =
    Arc<dyn Fn(&str, &ChatOptions, &ClientConfig) -> Result<Value> + Send + Sync>;

/// Replaces the adapter's default response mapping: `(vendor body, config) -> result`
pub type ResponseParsingOverride =
    Arc<dyn Fn(&Value, &ClientConfig) -> Result<ChatResult> + Send + Sync>;

#[derive(Clone, Default)]
struct Overrides {
    request: Option<RequestPreparationOverride>,
    response: Option<ResponseParsingOverride>,
}

/// Uniform chat handle over one vendor
#[derive(Clone)]
pub struct AiClient {
    adapter: Arc<dyn ProviderAdapter>,
    config: ClientConfig,
    transport: HttpTransport,
    overrides: Overrides,
}

impl fmt::Debug for AiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiClient")
            .field("provider", &self.adapter.provider_name())
            .field("model", &self.config.model)
            .field("endpoint", &self.config.endpoint)
            .field("timeout", &self.config.timeout)
            .field("request_override", &self.overrides.request.is_some())
            .field("response_override", &self.overrides.response.is_some())
            .finish()
    }
}

impl AiClient {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, config: ClientConfig) -> Result<Self> {
        let bearer = match adapter.auth_style() {
            AuthStyle::Bearer => Some(config.api_key.as_str()),
            AuthStyle::QueryKey => None,
        };
        let transport = HttpTransport::new(config.timeout, bearer)?;

        Ok(Self {
            adapter,
            config,
            transport,
            overrides: Overrides::default(),
        })
    }

    pub fn adapter(&self) -> &dyn ProviderAdapter {
        self.adapter.as_ref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolved chat endpoint (Gemini: with `key` query parameter)
    pub fn endpoint(&self) -> Result<Url> {
        self.adapter.endpoint(&self.config)
    }

    pub fn model_info(&self) -> ModelInfo {
        let or_unknown = |value: &str| {
            if value.is_empty() {
                "unknown".to_string()
            } else {
                value.to_string()
            }
        };
        ModelInfo {
            name: or_unknown(&self.config.model),
            provider: or_unknown(&self.config.provider),
        }
    }

    pub fn set_request_preparation_override<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str, &ChatOptions, &ClientConfig) -> Result<Value> + Send + Sync + 'static,
    {
        self.overrides.request = Some(Arc::new(hook));
        self
    }

    pub fn set_response_parsing_override<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Value, &ClientConfig) -> Result<ChatResult> + Send + Sync + 'static,
    {
        self.overrides.response = Some(Arc::new(hook));
        self
    }

    pub fn with_request_preparation_override<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &ChatOptions, &ClientConfig) -> Result<Value> + Send + Sync + 'static,
    {
        self.set_request_preparation_override(hook);
        self
    }

    pub fn with_response_parsing_override<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value, &ClientConfig) -> Result<ChatResult> + Send + Sync + 'static,
    {
        self.set_response_parsing_override(hook);
        self
    }

    pub fn clear_overrides(&mut self) {
        self.overrides = Overrides::default();
    }

    /// Request body for this call: the override's output, or the adapter default
    pub fn prepare_request(&self, prompt: &str, options: &ChatOptions) -> Result<Value> {
        match self.overrides.request {
            Some(ref hook) => {
                debug!(provider = self.adapter.provider_name(), "using request override");
                hook(prompt, options, &self.config)
            }
            None => Ok(self.adapter.build_request(prompt, options, &self.config)),
        }
    }

    /// Normalized result: the override's output, or the adapter default
    pub fn parse_response(&self, response: &Value) -> Result<ChatResult> {
        match self.overrides.response {
            Some(ref hook) => {
                debug!(provider = self.adapter.provider_name(), "using response override");
                hook(response, &self.config)
            }
            None => Ok(self.adapter.parse_response(response, &self.config)),
        }
    }

    pub async fn chat(&self, prompt: &str, options: &ChatOptions) -> Result<ChatResult> {
        let body = self.prepare_request(prompt, options)?;
        let url = self.endpoint()?;
        let response = self.transport.request(&url, &body).await?;
        self.parse_response(&response)
    }

    /// Raw response blocks, in arrival order
    pub fn chat_stream(
        &self,
        prompt: &str,
        options: &ChatOptions,
    ) -> Result<impl Stream<Item = Result<Vec<u8>>> + Send + 'static> {
        let mut body = self.prepare_request(prompt, options)?;
        self.adapter.mark_streaming(&mut body);
        let url = self.adapter.stream_endpoint(&self.config)?;
        Ok(self.transport.stream_request(url, body))
    }

    /// Calls `on_chunk` once per raw block and returns when the stream ends
    pub async fn stream_chat<F>(&self, prompt: &str, mut on_chunk: F, options: &ChatOptions) -> Result<()>
    where
        F: FnMut(&[u8]),
    {
        let stream = self.chat_stream(prompt, options)?;
        pin_mut!(stream);
        while let Some(block) = stream.next().await {
            let block = block?;
            on_chunk(block.as_slice());
        }
        Ok(())
    }

    /// Fails with `UnsupportedOperation` unless the adapter builds image requests
    pub async fn generate_image(&self, prompt: &str, options: &ChatOptions) -> Result<ChatResult> {
        let body = self.adapter.image_request(prompt, options, &self.config)?;
        let url = self.endpoint()?;
        let response = self.transport.request(&url, &body).await?;
        self.parse_response(&response)
    }
}
