use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;

use crate::generation::{GenerationError, TextGenerator};

/// Chat-completion backed generator. The persona rides along as the system
/// message on every request; the prompt is the per-notification payload.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    persona: String,
}

impl OpenAiGenerator {
    pub fn new(client: Client<OpenAIConfig>, model: String, persona: String) -> Self {
        Self {
            client,
            model,
            persona,
        }
    }

    /// Build a generator from an API key resolved out of the environment.
    /// Returns `None` when the key is absent so callers can fall back to
    /// template-only rendering instead of carrying a client that can never
    /// authenticate.
    pub fn from_env(
        api_key_env: &str,
        base_url: Option<&str>,
        model: &str,
        persona: &str,
    ) -> Option<Self> {
        let api_key = std::env::var(api_key_env).ok()?;
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base_url) = base_url {
            config = config.with_api_base(base_url);
        }
        Some(Self::new(
            Client::with_config(config),
            model.to_string(),
            persona.to_string(),
        ))
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.persona.clone())
                .build()
                .map_err(|err| GenerationError::RequestFailed(err.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|err| GenerationError::RequestFailed(err.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .build()
            .map_err(|err| GenerationError::RequestFailed(err.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|err| GenerationError::RequestFailed(err.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse("missing choices".to_string()))?;

        let content = choice.message.content.unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(GenerationError::InvalidResponse(
                "empty completion".to_string(),
            ));
        }
        Ok(content.to_string())
    }
}
