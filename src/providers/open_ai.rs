use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::prompt::ComposedMessages;
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Pick the configured key, else the environment one. Empty keys count as absent.
pub fn resolve_api_key(configured: Option<&str>, env: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.trim().is_empty())
        .map(str::to_string)
        .or_else(|| env.filter(|key| !key.trim().is_empty()))
}

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration.
    ///
    /// Returns `Ok(None)` when no API key is available in the config or in
    /// `OPENAI_API_KEY`.
    pub fn from_config(config: &ProviderConfig) -> Result<Option<Self>, ProviderError> {
        let Some(api_key) = resolve_api_key(
            config.api_key.as_deref(),
            std::env::var("OPENAI_API_KEY").ok(),
        ) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Some(OpenAIProvider {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }))
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Pull the first choice's content out of a chat-completion body.
fn first_choice_text(body: &Value) -> Result<Option<String>, ProviderError> {
    let choices = body["choices"].as_array().ok_or_else(|| {
        ProviderError::MalformedResponse("response has no choices array".to_string())
    })?;

    Ok(choices
        .first()
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::to_string))
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        messages: &ComposedMessages,
    ) -> Result<Option<String>, ProviderError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": messages.as_chat_messages(),
                "max_tokens": self.max_tokens,
                "temperature": self.temperature
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        first_choice_text(&response_body)
    }
}
