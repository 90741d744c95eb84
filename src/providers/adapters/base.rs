//! Base Provider Adapter
//! Shared `messages:[{role,content}]` chat-completions mapping used by most vendors

use serde_json::{json, Map, Value};

use super::traits::ProviderAdapter;
use crate::config::ClientConfig;
use crate::providers::constants::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::types::{ChatMessage, ChatOptions, ChatResult, Usage};

pub struct BaseAdapter {
    provider_name: String,
}

impl BaseAdapter {
    pub fn new(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
        }
    }

    /// Caller messages verbatim, or `[system?, user(prompt)]`
    pub fn messages(prompt: &str, options: &ChatOptions) -> Vec<ChatMessage> {
        if let Some(ref messages) = options.messages {
            return messages.clone();
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(ref system) = options.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(prompt));
        messages
    }

    /// `model`, `temperature`, `max_tokens` and the optional sampling knobs
    pub fn common_fields(&self, options: &ChatOptions, config: &ClientConfig) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert(
            "model".to_string(),
            json!(config.model_or_default(&self.provider_name)),
        );
        body.insert(
            "temperature".to_string(),
            json!(options.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        );
        body.insert(
            "max_tokens".to_string(),
            json!(options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
        );

        if let Some(top_p) = options.top_p {
            body.insert("top_p".to_string(), json!(top_p));
        }
        if let Some(freq) = options.frequency_penalty {
            body.insert("frequency_penalty".to_string(), json!(freq));
        }
        if let Some(presence) = options.presence_penalty {
            body.insert("presence_penalty".to_string(), json!(presence));
        }

        body
    }

    /// Standard result with the given text, reading `model`, `id` and `usage`
    /// from their OpenAI-style locations
    pub fn result_with_text(&self, text: &str, response: &Value, config: &ClientConfig) -> ChatResult {
        let mut extra = Map::new();
        if let Some(reasoning) = response
            .pointer("/choices/0/message/reasoning_content")
            .and_then(Value::as_str)
        {
            extra.insert("reasoning_content".to_string(), json!(reasoning));
        }

        ChatResult {
            text: text.to_string(),
            model: str_field(response, "model")
                .map(str::to_string)
                .unwrap_or_else(|| config.model_or_default(&self.provider_name)),
            id: str_field(response, "id").unwrap_or_default().to_string(),
            usage: Usage::from_value(response.get("usage")),
            error: None,
            extra,
        }
    }
}

impl ProviderAdapter for BaseAdapter {
    fn provider_name(&self) -> &str {
        &self.provider_name
    }

    fn build_request(&self, prompt: &str, options: &ChatOptions, config: &ClientConfig) -> Value {
        let mut body = self.common_fields(options, config);
        body.insert(
            "messages".to_string(),
            json!(Self::messages(prompt, options)),
        );
        merge_extra(&mut body, options);
        Value::Object(body)
    }

    fn parse_response(&self, response: &Value, config: &ClientConfig) -> ChatResult {
        let text = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        self.result_with_text(text, response, config)
    }
}

/// Vendor passthrough fields win over defaults
pub(crate) fn merge_extra(body: &mut Map<String, Value>, options: &ChatOptions) {
    body.extend(options.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
}

pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}
