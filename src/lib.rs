//! Uniform chat client over several third-party LLM vendors.
//!
//! ```no_run
//! use ai_plugin::{AiClientFactory, ChatOptions, ClientConfig};
//!
//! # async fn run() -> ai_plugin::Result<()> {
//! let config = ClientConfig::new("deepseek", "sk-...").model("deepseek-chat");
//! let client = AiClientFactory::create("deepseek", config)?;
//! let result = client.chat("hello", &ChatOptions::new().system("be terse")).await?;
//! println!("{} ({} tokens)", result.text, result.usage.total_tokens);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod providers;
pub mod transport;
pub mod types;

pub use client::{AiClient, RequestPreparationOverride, ResponseParsingOverride};
pub use config::{AiConfig, ClientConfig};
pub use error::{AiError, Result};
pub use providers::adapters::{AiClientFactory, AuthStyle, ProviderAdapter};
pub use providers::Provider;
pub use types::{ChatMessage, ChatOptions, ChatResult, ModelInfo, Usage, VendorError};
