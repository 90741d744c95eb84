//! OpenAI Compatible Provider Adapter
//! Handles the vendors that speak the plain chat-completions dialect
//! (Qianwen, Volcano, DeepSeek, Hunyuan, Zhipu, Moonshot)

use serde_json::Value;

use super::base::BaseAdapter;
use super::traits::ProviderAdapter;
use crate::config::ClientConfig;
use crate::types::{ChatOptions, ChatResult};

pub struct OpenAICompatibleAdapter {
    base: BaseAdapter,
    provider_name: &'static str,
}

impl OpenAICompatibleAdapter {
    pub fn new(provider_name: &'static str) -> Self {
        Self {
            base: BaseAdapter::new(provider_name),
            provider_name,
        }
    }
}

impl ProviderAdapter for OpenAICompatibleAdapter {
    fn provider_name(&self) -> &str {
        self.provider_name
    }

    fn build_request(&self, prompt: &str, options: &ChatOptions, config: &ClientConfig) -> Value {
        self.base.build_request(prompt, options, config)
    }

    fn parse_response(&self, response: &Value, config: &ClientConfig) -> ChatResult {
        self.base.parse_response(response, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_uses_vendor_default() {
        let adapter = OpenAICompatibleAdapter::new("deepseek");
        let url = adapter.endpoint(&ClientConfig::default()).unwrap();
        assert_eq!(url.as_str(), "https://api.deepseek.com/v1/chat/completions");
    }

    #[test]
    fn moonshot_uses_chat_completions_dialect() {
        let adapter = OpenAICompatibleAdapter::new("moonshot");
        let config = ClientConfig::new("moonshot", "k");
        let body = adapter.build_request("hi", &ChatOptions::new().system("be brief"), &config);
        assert_eq!(body["model"], "moonshot-v1-8k");
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "be brief"}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "hi"}));
        assert_eq!(
            adapter.endpoint(&config).unwrap().as_str(),
            "https://api.moonshot.cn/v1/chat/completions"
        );
    }

    #[test]
    fn parse_is_deterministic() {
        let adapter = OpenAICompatibleAdapter::new("qianwen");
        let config = ClientConfig::new("qianwen", "k");
        let fixture = json!({
            "id": "abc",
            "model": "qwen-turbo",
            "choices": [{"message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
        });

        let first = adapter.parse_response(&fixture, &config);
        let second = adapter.parse_response(&fixture, &config);
        assert_eq!(first, second);
        assert_eq!(first.text, "hello");
    }
}
