//! Turns a short statement of intent into a polished prompt for a
//! chat-completion model.
//!
//! A request picks a content template and a tone. The template text, the
//! tone directive and the intent are composed into a system/user message
//! pair, which is sent once to the configured provider. The first returned
//! choice is the generated prompt.

pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod server;

use std::sync::Arc;

use log::{info, warn};

pub use config::AppConfig;
pub use error::{GenerateError, ProviderError};
pub use generator::{GenerationRequest, PromptGenerator, GENERATION_FAILED_PLACEHOLDER};
pub use prompt::{compose, ComposedMessages};
pub use providers::{LlmProvider, OpenAIProvider};
pub use registry::{resolve_template, resolve_tone, TemplateId, ToneId};
pub use server::{router, AppState};

/// Build the generator described by the configuration.
///
/// A missing API key is not an error here: the generator is created without
/// a provider and every request answers with a configuration error.
pub fn build_generator(config: &AppConfig) -> Result<PromptGenerator, ProviderError> {
    let provider: Option<Arc<dyn LlmProvider>> =
        match OpenAIProvider::from_config(&config.provider)? {
            Some(provider) => {
                info!("Using openai provider with model {}", provider.model());
                Some(Arc::new(provider))
            }
            None => {
                warn!("No provider API key configured, generation requests will fail");
                None
            }
        };

    Ok(PromptGenerator::new(provider, config.limits.max_intent_chars))
}
