mod open_ai;

pub use open_ai::{resolve_api_key, OpenAIProvider};

use crate::error::ProviderError;
use crate::prompt::ComposedMessages;
use async_trait::async_trait;

/// Unified trait for chat-completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Send the composed messages and return the first choice's text.
    ///
    /// `Ok(None)` means the call succeeded but carried no usable text.
    async fn complete(&self, messages: &ComposedMessages)
        -> Result<Option<String>, ProviderError>;
}
