use super::text_generation_repository::TextGenerationRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat completions implementation of the text generation repository
pub struct OpenAiTextRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTextRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TextGenerationRepository for OpenAiTextRepository {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling OpenAI chat completion"
        );

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| format!("Invalid OpenAI message: {}", e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([message.into()])
            .build()
            .map_err(|e| format!("Invalid OpenAI request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                "OpenAI chat completion failed"
            );
            format!("OpenAI error: {}", e)
        })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        tracing::info!(
            latency_ms = start_time.elapsed().as_millis(),
            response_length = text.len(),
            "OpenAI chat completion finished"
        );

        Ok(text)
    }
}
