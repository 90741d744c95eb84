//! Provider Adapter System
//! Provides a unified interface for different AI providers with provider-specific logic

pub mod factory;
pub mod traits;

mod base;
mod gemini;
mod minimax;
mod openai;
mod wenxin;

pub use base::BaseAdapter;
pub use factory::{get_provider_adapter, AiClientFactory};
pub use traits::{AuthStyle, ProviderAdapter};
