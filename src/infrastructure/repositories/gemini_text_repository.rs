use super::gemini_types::GeminiRequest;
use super::gemini_types::GeminiResponse;
use super::text_generation_repository::TextGenerationRepository;
use async_trait::async_trait;

/// Gemini `generateContent` implementation of the text generation repository
pub struct GeminiTextRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiTextRepository {
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerationRepository for GeminiTextRepository {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();
        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling Gemini text generation"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiRequest::user_text(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Gemini request failed");
                format!("Gemini request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                error = %error_text,
                "Gemini text generation returned an error"
            );
            return Err(format!("Gemini error {}: {}", status.as_u16(), error_text));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Gemini response: {}", e))?;

        let text = body.text();
        tracing::info!(
            latency_ms = start_time.elapsed().as_millis(),
            response_length = text.len(),
            "Gemini text generation completed"
        );

        Ok(text)
    }
}
