//! Gemini Provider Adapter
//! Handles Google's Gemini models

use serde_json::{json, Map, Value};
use url::Url;

use super::base::{merge_extra, str_field};
use super::traits::{parse_endpoint, AuthStyle, ProviderAdapter};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::providers::constants::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::providers::resolve_endpoint;
use crate::types::{ChatOptions, ChatResult, Usage};

const GENERATE_ACTION: &str = ":generateContent";
const STREAM_ACTION: &str = ":streamGenerateContent";

pub struct GeminiAdapter;

impl GeminiAdapter {
    pub fn new() -> Self {
        Self
    }

    fn base_endpoint(&self, config: &ClientConfig) -> Result<Url> {
        let model = config.model_or_default("gemini");
        let raw = resolve_endpoint("gemini", config.endpoint.as_deref())
            .unwrap_or_default()
            .replace("{model}", &model);
        parse_endpoint(&raw)
    }

    fn with_key(mut url: Url, config: &ClientConfig) -> Url {
        url.query_pairs_mut().append_pair("key", &config.api_key);
        url
    }

    /// Gemini names the assistant turn `model`
    fn gemini_role(role: &str) -> &str {
        match role {
            "assistant" => "model",
            other => other,
        }
    }

    fn content(role: &str, text: &str) -> Value {
        json!({
            "role": role,
            "parts": [{"text": text}]
        })
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn auth_style(&self) -> AuthStyle {
        AuthStyle::QueryKey
    }

    fn endpoint(&self, config: &ClientConfig) -> Result<Url> {
        Ok(Self::with_key(self.base_endpoint(config)?, config))
    }

    /// Swaps `:generateContent` for `:streamGenerateContent?alt=sse`
    fn stream_endpoint(&self, config: &ClientConfig) -> Result<Url> {
        let mut url = self.base_endpoint(config)?;
        if url.path().ends_with(GENERATE_ACTION) {
            let path = url.path().replace(GENERATE_ACTION, STREAM_ACTION);
            url.set_path(&path);
            url.query_pairs_mut().append_pair("alt", "sse");
        }
        Ok(Self::with_key(url, config))
    }

    fn build_request(&self, prompt: &str, options: &ChatOptions, _config: &ClientConfig) -> Value {
        let mut generation_config = Map::new();
        generation_config.insert(
            "temperature".to_string(),
            json!(options.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        );
        generation_config.insert(
            "maxOutputTokens".to_string(),
            json!(options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
        );
        // Gemini uses camelCase sampling names
        if let Some(top_p) = options.top_p {
            generation_config.insert("topP".to_string(), json!(top_p));
        }
        if let Some(freq) = options.frequency_penalty {
            generation_config.insert("frequencyPenalty".to_string(), json!(freq));
        }
        if let Some(presence) = options.presence_penalty {
            generation_config.insert("presencePenalty".to_string(), json!(presence));
        }

        let mut body = Map::new();
        body.insert("generationConfig".to_string(), Value::Object(generation_config));

        let contents = match options.messages {
            Some(ref messages) => {
                let mut contents = Vec::with_capacity(messages.len());
                for message in messages {
                    if message.role == "system" {
                        body.insert("systemInstruction".to_string(), json!(message.content));
                    } else {
                        contents.push(Self::content(
                            Self::gemini_role(&message.role),
                            &message.content,
                        ));
                    }
                }
                contents
            }
            None => {
                if let Some(ref system) = options.system {
                    body.insert("systemInstruction".to_string(), json!(system));
                }
                vec![Self::content("user", prompt)]
            }
        };
        body.insert("contents".to_string(), Value::Array(contents));

        merge_extra(&mut body, options);
        Value::Object(body)
    }

    fn mark_streaming(&self, _body: &mut Value) {
        // Streaming is selected by the endpoint, not the body.
    }

    fn parse_response(&self, response: &Value, config: &ClientConfig) -> ChatResult {
        let text = response
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default();

        ChatResult {
            text: text.to_string(),
            model: str_field(response, "modelVersion")
                .map(str::to_string)
                .unwrap_or_else(|| config.model_or_default("gemini")),
            id: str_field(response, "responseId")
                .or_else(|| str_field(response, "requestId"))
                .unwrap_or_default()
                .to_string(),
            usage: Usage::from_value(response.get("usageMetadata")),
            error: None,
            extra: Map::new(),
        }
    }
}
