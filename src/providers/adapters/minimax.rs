//! MiniMax Provider Adapter
//! Handles the MiniMax chat API, including its legacy `reply` format and the
//! `base_resp` error envelope

use serde_json::{json, Map, Value};

use super::base::{merge_extra, str_field, BaseAdapter};
use super::traits::ProviderAdapter;
use crate::config::ClientConfig;
use crate::types::{ChatMessage, ChatOptions, ChatResult, VendorError};

pub const MINIMAX_BOT_NAME: &str = "MiniMax AI";
pub const MINIMAX_USER_NAME: &str = "User";

pub struct MinimaxAdapter {
    base: BaseAdapter,
}

impl MinimaxAdapter {
    pub fn new() -> Self {
        Self {
            base: BaseAdapter::new("minmax"),
        }
    }

    /// MiniMax wants every message named; fill in a per-role default
    fn named(mut message: ChatMessage) -> ChatMessage {
        if message.name.is_none() {
            let name = match message.role.as_str() {
                "user" => MINIMAX_USER_NAME,
                _ => MINIMAX_BOT_NAME,
            };
            message.name = Some(name.to_string());
        }
        message
    }

    fn vendor_error(response: &Value) -> Option<VendorError> {
        let base_resp = response.get("base_resp")?;
        let code = base_resp.get("status_code").and_then(Value::as_i64)?;
        if code == 0 {
            return None;
        }
        Some(VendorError {
            code,
            message: str_field(base_resp, "status_msg").unwrap_or_default().to_string(),
        })
    }
}

impl Default for MinimaxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for MinimaxAdapter {
    fn provider_name(&self) -> &str {
        "minmax"
    }

    fn build_request(&self, prompt: &str, options: &ChatOptions, config: &ClientConfig) -> Value {
        let messages: Vec<ChatMessage> = BaseAdapter::messages(prompt, options)
            .into_iter()
            .map(Self::named)
            .collect();

        let mut body = self.base.common_fields(options, config);
        body.insert("messages".to_string(), json!(messages));
        merge_extra(&mut body, options);
        Value::Object(body)
    }

    fn parse_response(&self, response: &Value, config: &ClientConfig) -> ChatResult {
        if let Some(error) = Self::vendor_error(response) {
            return ChatResult {
                text: format!("MiniMax API error {}: {}", error.code, error.message),
                model: config.model_or_default("minmax"),
                id: str_field(response, "id").unwrap_or_default().to_string(),
                usage: Default::default(),
                error: Some(error),
                extra: Map::new(),
            };
        }

        // Current API answers in `choices`, the legacy one in `reply`
        let text = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .or_else(|| str_field(response, "reply"))
            .unwrap_or_default();
        self.base.result_with_text(text, response, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("minmax", "mm-key")
    }

    #[test]
    fn single_turn_gets_named_messages() {
        let body = MinimaxAdapter::new().build_request(
            "hi",
            &ChatOptions::new().system("helper"),
            &config(),
        );

        assert_eq!(
            body["messages"],
            json!([
                {"role": "system", "content": "helper", "name": "MiniMax AI"},
                {"role": "user", "content": "hi", "name": "User"}
            ])
        );
        assert_eq!(body["model"], "abab6.5s-chat");
    }

    #[test]
    fn existing_names_are_kept() {
        let options = ChatOptions::new().messages(vec![
            ChatMessage::user("q").with_name("Alice"),
            ChatMessage::assistant("a"),
        ]);
        let body = MinimaxAdapter::new().build_request("unused", &options, &config());

        assert_eq!(body["messages"][0]["name"], "Alice");
        assert_eq!(body["messages"][1]["name"], MINIMAX_BOT_NAME);
    }

    #[test]
    fn legacy_and_current_formats_parse_alike() {
        let adapter = MinimaxAdapter::new();
        let usage = json!({"total_tokens": 7});
        let legacy = adapter.parse_response(&json!({"reply": "x", "usage": usage}), &config());
        let current = adapter.parse_response(
            &json!({
                "choices": [{"message": {"content": "x"}}],
                "usage": usage,
                "base_resp": {"status_code": 0, "status_msg": ""}
            }),
            &config(),
        );

        assert_eq!(legacy.text, "x");
        assert_eq!(current.text, "x");
        assert_eq!(legacy.usage.total_tokens, 7);
        assert!(current.error.is_none());
    }

    #[test]
    fn base_resp_error_is_reported_in_result() {
        let result = MinimaxAdapter::new().parse_response(
            &json!({"base_resp": {"status_code": 1, "status_msg": "bad key"}}),
            &config(),
        );

        let error = result.error.clone().expect("vendor error");
        assert_eq!(error.code, 1);
        assert_eq!(error.message, "bad key");
        assert!(result.text.contains("bad key"));
        assert!(result.is_error());
    }
}
