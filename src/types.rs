//! Request/response data types shared by every provider

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Per-call options. Anything in `extra` is merged into the top level of the
/// default request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// Vendor-specific field passed through as-is
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Token accounting, normalized across vendors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl Usage {
    /// Reads OpenAI-style and Gemini-style usage objects. A missing total is
    /// the sum of the parts.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        let read = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| value.get(*key).and_then(Value::as_u64))
        };

        let prompt_tokens = read(&["prompt_tokens", "promptTokenCount", "input_tokens"]).unwrap_or(0);
        let completion_tokens =
            read(&["completion_tokens", "candidatesTokenCount", "output_tokens"]).unwrap_or(0);
        let total_tokens = read(&["total_tokens", "totalTokenCount"])
            .unwrap_or(prompt_tokens.saturating_add(completion_tokens));

        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

/// Logical error reported inside a successful HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorError {
    pub code: i64,
    pub message: String,
}

/// Normalized chat output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VendorError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn usage_sum_saturates_on_huge_counts() {
        let usage = Usage::from_value(Some(&json!({
            "prompt_tokens": u64::MAX,
            "completion_tokens": 1
        })));
        assert_eq!(usage.prompt_tokens, u64::MAX);
        assert_eq!(usage.total_tokens, u64::MAX);
    }

    #[test]
    fn usage_reads_gemini_counts() {
        let usage = Usage::from_value(Some(&json!({
            "promptTokenCount": 4,
            "candidatesTokenCount": 6,
            "totalTokenCount": 10
        })));
        assert_eq!(usage.prompt_tokens, 4);
        assert_eq!(usage.completion_tokens, 6);
        assert_eq!(usage.total_tokens, 10);
    }

    #[test]
    fn usage_total_falls_back_to_sum() {
        let usage = Usage::from_value(Some(&json!({"prompt_tokens": 3, "completion_tokens": 2})));
        assert_eq!(usage.total_tokens, 5);
        assert_eq!(Usage::from_value(None), Usage::default());
    }

    #[test]
    fn options_extra_fields_flatten() {
        let options: ChatOptions = serde_json::from_value(json!({
            "temperature": 0.2,
            "enable_search": true
        }))
        .unwrap();
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.extra.get("enable_search"), Some(&json!(true)));
    }
}
