//! Provider configuration constants
//! Centralized defaults for all AI providers

/// Default chat endpoints for all providers
pub const PROVIDER_ENDPOINTS: &[(&str, &str)] = &[
  ("wenxin", "https://aip.baidubce.com/rpc/2.0/ai_custom/v1/wenxinworkshop/chat/completions"),
  ("qianwen", "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions"),
  ("volcano", "https://ark.cn-beijing.volces.com/api/v3/chat/completions"),
  ("deepseek", "https://api.deepseek.com/v1/chat/completions"),
  ("hunyuan", "https://api.hunyuan.cloud.tencent.com/v1/chat/completions"),
  ("zhipu", "https://open.bigmodel.cn/api/paas/v4/chat/completions"),
  ("moonshot", "https://api.moonshot.cn/v1/chat/completions"),
  // `{model}` is substituted with the configured model
  ("gemini", "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"),
  ("minmax", "https://api.minimax.chat/v1/text/chatcompletion_v2"),
];

/// Default models for each provider
pub const DEFAULT_MODELS: &[(&str, &str)] = &[
  ("wenxin", "ernie-bot"),
  ("qianwen", "qwen-turbo"),
  ("volcano", "doubao-pro-32k"),
  ("deepseek", "deepseek-chat"),
  ("hunyuan", "hunyuan-pro"),
  ("zhipu", "glm-4"),
  ("moonshot", "moonshot-v1-8k"),
  ("gemini", "gemini-pro"),
  ("minmax", "abab6.5s-chat"),
];

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Read size for streaming responses
pub const STREAM_BLOCK_SIZE: usize = 1024;

/// Get default endpoint for a provider
pub fn get_default_endpoint(provider: &str) -> Option<&'static str> {
  PROVIDER_ENDPOINTS.iter().find(|(p, _)| *p == provider).map(|(_, url)| *url)
}

/// Get default model for a provider
pub fn get_default_model(provider: &str) -> Option<&'static str> {
  DEFAULT_MODELS.iter().find(|(p, _)| *p == provider).map(|(_, model)| *model)
}

/// Get provider configuration
pub fn get_provider_config(provider: &str) -> ProviderConfig {
  ProviderConfig {
    endpoint: get_default_endpoint(provider).map(|s| s.to_string()),
    default_model: get_default_model(provider).map(|s| s.to_string()),
  }
}

/// Static per-provider defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
  pub endpoint: Option<String>,
  pub default_model: Option<String>,
}
