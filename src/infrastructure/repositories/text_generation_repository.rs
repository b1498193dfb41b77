use async_trait::async_trait;

/// Repository for free-form text generation (podcast scripts, enhanced briefs).
/// Abstracts the underlying LLM provider (Gemini, OpenAI)
#[async_trait]
pub trait TextGenerationRepository: Send + Sync {
    /// Generate a completion for a single user prompt
    ///
    /// # Errors
    /// Returns error if the provider is unavailable or answers with a failure
    async fn generate(&self, prompt: &str) -> Result<String, String>;
}
