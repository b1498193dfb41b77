use super::error::ScriptServiceError;
use super::prompt::{build_enhance_prompt, build_script_prompt};
use crate::infrastructure::repositories::TextGenerationRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ScriptService {
    text_repo: Arc<dyn TextGenerationRepository>,
}

impl ScriptService {
    pub fn new(text_repo: Arc<dyn TextGenerationRepository>) -> Self {
        Self { text_repo }
    }
}

#[async_trait]
pub trait ScriptServiceApi: Send + Sync {
    /// Write a `Speaker 1: ... Speaker N: ...` dialogue about a theme
    async fn generate_script(
        &self,
        theme: &str,
        duration_minutes: u8,
        num_hosts: u8,
    ) -> Result<String, ScriptServiceError>;

    /// Expand a short idea into a richer podcast brief
    async fn enhance_text(&self, text: &str) -> Result<String, ScriptServiceError>;
}

#[async_trait]
impl ScriptServiceApi for ScriptService {
    async fn generate_script(
        &self,
        theme: &str,
        duration_minutes: u8,
        num_hosts: u8,
    ) -> Result<String, ScriptServiceError> {
        tracing::info!(
            theme_preview = preview(theme, 100),
            duration_minutes = duration_minutes,
            num_hosts = num_hosts,
            "Script generation request"
        );

        let prompt = build_script_prompt(theme, duration_minutes, num_hosts);
        tracing::debug!(prompt_length = prompt.len(), "Script prompt formatted");

        let script = self.generate(&prompt).await?;

        tracing::info!(script_length = script.len(), "Script generated");
        Ok(script)
    }

    async fn enhance_text(&self, text: &str) -> Result<String, ScriptServiceError> {
        if text.trim().is_empty() {
            return Err(ScriptServiceError::Invalid("Text cannot be empty".to_string()));
        }

        tracing::info!(text_preview = preview(text, 100), "Text enhancement request");

        let enhanced = self.generate(&build_enhance_prompt(text)).await?;

        tracing::info!(enhanced_length = enhanced.len(), "Text enhanced");
        Ok(enhanced)
    }
}

impl ScriptService {
    async fn generate(&self, prompt: &str) -> Result<String, ScriptServiceError> {
        let text = self
            .text_repo
            .generate(prompt)
            .await
            .map_err(ScriptServiceError::Dependency)?;

        if text.trim().is_empty() {
            tracing::error!("Empty response from text generation service");
            return Err(ScriptServiceError::Dependency(
                "Empty response from text generation service".to_string(),
            ));
        }

        Ok(text)
    }
}

/// First `max_chars` characters of `text`, for log lines
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
