use serde::Deserialize;
use std::env;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Gemini
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub llm_provider: LlmProvider,
    pub llm_model: String,
    pub tts_model: String,
    pub openai_api_key: Option<String>,
    // Audio storage
    pub aws_region: String,
    pub audio_bucket: Option<String>,
    pub signed_url_expiration_hours: u32,
    // TTS Cache
    pub tts_cache_enabled: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Backend used for script writing and text enhancement
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            gemini_api_key: env::var("GEMINI_API_KEY")?,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            llm_provider: parse_llm_provider(&env::var("LLM_PROVIDER").unwrap_or_default()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            tts_model: env::var("TTS_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro-preview-tts".to_string()),
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            audio_bucket: non_empty(env::var("BUCKET_AUDIOS").ok()),
            signed_url_expiration_hours: env::var("SIGNED_URL_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            tts_cache_enabled: env::var("TTS_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            cors_origins: parse_cors_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
        };

        if config.llm_provider == LlmProvider::OpenAi && config.openai_api_key.is_none() {
            return Err("OPENAI_API_KEY is required when LLM_PROVIDER=openai".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_llm_provider(value: &str) -> LlmProvider {
    match value.trim().to_lowercase().as_str() {
        "openai" => LlmProvider::OpenAi,
        _ => LlmProvider::Gemini,
    }
}

/// Comma separated list; `*` means any origin
fn parse_cors_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
