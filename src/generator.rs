use std::sync::Arc;

use log::{error, info};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::GenerateError;
use crate::prompt::compose;
use crate::providers::LlmProvider;
use crate::registry::{TemplateId, ToneId};

/// Returned in place of an empty provider answer
pub const GENERATION_FAILED_PLACEHOLDER: &str = "プロンプトの生成に失敗しました";

/// Request payload of the generation endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub template: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub tone: Option<String>,
}

/// Non-string ids resolve like unknown ones instead of failing the body
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

impl GenerationRequest {
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: Some(intent.into()),
            ..Self::default()
        }
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }
}

/// Runs the generation flow against a shared provider.
///
/// Built once at startup. `provider` is `None` when no credential is
/// configured, in which case every call fails with
/// [`GenerateError::MissingApiKey`] without touching the network.
#[derive(Clone)]
pub struct PromptGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    max_intent_chars: usize,
}

impl PromptGenerator {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, max_intent_chars: usize) -> Self {
        Self {
            provider,
            max_intent_chars,
        }
    }

    pub fn max_intent_chars(&self) -> usize {
        self.max_intent_chars
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.provider_name())
    }

    /// The configured provider, or the configuration error
    pub fn provider(&self) -> Result<&dyn LlmProvider, GenerateError> {
        match self.provider.as_deref() {
            Some(provider) => Ok(provider),
            None => {
                error!("Generation rejected: no provider API key configured");
                Err(GenerateError::MissingApiKey)
            }
        }
    }

    fn validate_intent<'a>(&self, intent: Option<&'a str>) -> Result<&'a str, GenerateError> {
        let intent = intent
            .filter(|i| !i.trim().is_empty())
            .ok_or(GenerateError::MissingIntent)?;

        let len = intent.chars().count();
        if len > self.max_intent_chars {
            return Err(GenerateError::IntentTooLong {
                len,
                max: self.max_intent_chars,
            });
        }
        Ok(intent)
    }

    /// Generate a prompt for the request.
    ///
    /// Checks the credential first, then the intent. Exactly one provider
    /// call is made once both pass.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let provider = self.provider()?;
        self.generate_with(provider, request).await
    }

    /// Same as [`PromptGenerator::generate`] for a provider already
    /// obtained from [`PromptGenerator::provider`].
    pub async fn generate_with(
        &self,
        provider: &dyn LlmProvider,
        request: &GenerationRequest,
    ) -> Result<String, GenerateError> {
        let intent = self.validate_intent(request.intent.as_deref())?;

        let template = TemplateId::from_id(request.template.as_deref());
        let tone = ToneId::from_id(request.tone.as_deref());
        info!(
            "Generating prompt (template: {}, tone: {}, intent: {} chars)",
            template.as_str(),
            tone.as_str(),
            intent.chars().count()
        );

        let messages = compose(template.instruction(), tone.instruction(), intent);

        match provider.complete(&messages).await {
            Ok(Some(text)) if !text.is_empty() => Ok(text),
            Ok(_) => {
                info!(
                    "{} returned no usable choice, using placeholder",
                    provider.provider_name()
                );
                Ok(GENERATION_FAILED_PLACEHOLDER.to_string())
            }
            Err(e) => {
                error!("Generation error from {}: {}", provider.provider_name(), e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::prompt::ComposedMessages;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the messages it receives and replays a fixed answer
    struct RecordingProvider {
        answer: fn() -> Result<Option<String>, ProviderError>,
        seen: Mutex<Vec<ComposedMessages>>,
    }

    impl RecordingProvider {
        fn new(answer: fn() -> Result<Option<String>, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        fn provider_name(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            messages: &ComposedMessages,
        ) -> Result<Option<String>, ProviderError> {
            self.seen.lock().unwrap().push(messages.clone());
            (self.answer)()
        }
    }

    fn generator(provider: &Arc<RecordingProvider>) -> PromptGenerator {
        PromptGenerator::new(Some(provider.clone() as Arc<dyn LlmProvider>), 20)
    }

    #[tokio::test]
    async fn test_generate_success() {
        let provider = RecordingProvider::new(|| Ok(Some("X".to_string())));
        let request = GenerationRequest::new("ブログを書きたい")
            .template("blog-post")
            .tone("casual");

        let prompt = generator(&provider).generate(&request).await.unwrap();
        assert_eq!(prompt, "X");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            compose(
                TemplateId::BlogPost.instruction(),
                ToneId::Casual.instruction(),
                "ブログを書きたい"
            )
        );
    }

    #[tokio::test]
    async fn test_unknown_ids_use_defaults() {
        let provider = RecordingProvider::new(|| Ok(Some("X".to_string())));
        let request = GenerationRequest::new("x").template("poem").tone("loud");

        generator(&provider).generate(&request).await.unwrap();

        let seen = provider.seen.lock().unwrap();
        assert!(seen[0]
            .system
            .starts_with(TemplateId::BusinessEmail.instruction()));
        assert!(seen[0].system.contains(ToneId::Formal.instruction()));
    }

    #[test]
    fn test_non_string_ids_deserialize_as_absent() {
        let request: GenerationRequest = serde_json::from_str(
            r#"{"intent": "ok", "template": 5, "tone": ["casual"]}"#,
        )
        .unwrap();
        assert_eq!(request.intent.as_deref(), Some("ok"));
        assert!(request.template.is_none());
        assert!(request.tone.is_none());

        let request: GenerationRequest =
            serde_json::from_str(r#"{"intent": "ok", "template": null, "tone": "casual"}"#)
                .unwrap();
        assert!(request.template.is_none());
        assert_eq!(request.tone.as_deref(), Some("casual"));
    }

    #[tokio::test]
    async fn test_placeholder_for_missing_or_empty_text() {
        for answer in [
            (|| Ok(None)) as fn() -> Result<Option<String>, ProviderError>,
            || Ok(Some(String::new())),
        ] {
            let provider = RecordingProvider::new(answer);
            let prompt = generator(&provider)
                .generate(&GenerationRequest::new("x"))
                .await
                .unwrap();
            assert_eq!(prompt, GENERATION_FAILED_PLACEHOLDER);
        }
    }

    #[tokio::test]
    async fn test_blank_intent_is_rejected_before_provider() {
        let provider = RecordingProvider::new(|| Ok(Some("X".to_string())));
        for request in [
            GenerationRequest::default(),
            GenerationRequest::new(""),
            GenerationRequest::new(" \n\t　"),
        ] {
            let err = generator(&provider).generate(&request).await.unwrap_err();
            assert!(matches!(err, GenerateError::MissingIntent));
        }
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_intent_length_limit_counts_characters() {
        let provider = RecordingProvider::new(|| Ok(Some("X".to_string())));
        let generator = generator(&provider);

        // 20 multi-byte characters fit the limit of 20
        let at_limit = "あ".repeat(20);
        assert!(generator
            .generate(&GenerationRequest::new(at_limit))
            .await
            .is_ok());

        let err = generator
            .generate(&GenerationRequest::new("あ".repeat(21)))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::IntentTooLong { len: 21, max: 20 }));
        assert_eq!(provider.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_provider_wins_over_missing_intent() {
        let generator = PromptGenerator::new(None, 20);
        let err = generator
            .generate(&GenerationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingApiKey));
        assert_eq!(generator.provider_name(), None);
    }

    #[tokio::test]
    async fn test_provider_failure_is_propagated() {
        let provider = RecordingProvider::new(|| {
            Err(ProviderError::MalformedResponse("garbage".to_string()))
        });
        let err = generator(&provider)
            .generate(&GenerationRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Provider(_)));
    }
}
