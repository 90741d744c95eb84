//! Wenxin Provider Adapter
//! Handles Baidu's ERNIE models; the reply text lives in `result`

use serde_json::Value;

use super::base::{str_field, BaseAdapter};
use super::traits::ProviderAdapter;
use crate::config::ClientConfig;
use crate::types::{ChatOptions, ChatResult};

pub struct WenxinAdapter {
    base: BaseAdapter,
}

impl WenxinAdapter {
    pub fn new() -> Self {
        Self {
            base: BaseAdapter::new("wenxin"),
        }
    }
}

impl Default for WenxinAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for WenxinAdapter {
    fn provider_name(&self) -> &str {
        "wenxin"
    }

    fn build_request(&self, prompt: &str, options: &ChatOptions, config: &ClientConfig) -> Value {
        self.base.build_request(prompt, options, config)
    }

    fn parse_response(&self, response: &Value, config: &ClientConfig) -> ChatResult {
        let text = str_field(response, "result").unwrap_or_default();
        self.base.result_with_text(text, response, config)
    }
}
