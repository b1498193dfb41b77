use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use async_openai::config::OpenAIConfig;
use podcast_backend::infrastructure::config::{Config, LlmProvider, LogFormat};
use podcast_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use podcast_backend::infrastructure::http::start_http_server;
use podcast_backend::infrastructure::repositories::{
    AudioStorage, GeminiSynthesisRepository, GeminiTextRepository, OpenAiTextRepository,
    PodcastRepository, S3AudioStorage, TextGenerationRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting Podcast Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let http_client = reqwest::Client::new();

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool and provider clients)
    tracing::info!("Instantiating repositories...");
    let podcast_repo = Arc::new(PodcastRepository::new(pool.clone()));

    let text_repo: Arc<dyn TextGenerationRepository> = match config.llm_provider {
        LlmProvider::Gemini => Arc::new(GeminiTextRepository::new(
            http_client.clone(),
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
            config.llm_model.clone(),
        )),
        LlmProvider::OpenAi => {
            let openai_config = OpenAIConfig::new()
                .with_api_key(config.openai_api_key.clone().unwrap_or_default());
            Arc::new(OpenAiTextRepository::new(
                Arc::new(async_openai::Client::with_config(openai_config)),
                config.llm_model.clone(),
            ))
        }
    };
    tracing::info!(provider = ?config.llm_provider, model = %config.llm_model, "Text generation configured");

    let synthesis_repo = Arc::new(GeminiSynthesisRepository::new(
        http_client.clone(),
        config.gemini_base_url.clone(),
        config.gemini_api_key.clone(),
        config.tts_model.clone(),
    ));

    let storage: Option<Arc<dyn AudioStorage>> = match &config.audio_bucket {
        Some(bucket) => {
            tracing::info!(bucket = %bucket, region = %config.aws_region, "Initializing S3 audio storage");
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
            Some(Arc::new(S3AudioStorage::new(
                s3_client,
                bucket.clone(),
                config.aws_region.clone(),
            )))
        }
        None => {
            tracing::warn!("BUCKET_AUDIOS not set, generated podcasts will not be persisted");
            None
        }
    };

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let script_service = Arc::new(podcast_backend::domain::script::ScriptService::new(text_repo));
    let tts_service = Arc::new(podcast_backend::domain::tts::TtsService::new(
        synthesis_repo,
        config.tts_cache_enabled,
    ));
    let document_service = Arc::new(podcast_backend::domain::document::DocumentService::new());
    let podcast_service = Arc::new(podcast_backend::domain::podcast::PodcastService::new(
        podcast_repo,
        storage,
        config.signed_url_expiration_hours,
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let podcast_controller = Arc::new(podcast_backend::controllers::podcast::PodcastController::new(
        script_service,
        tts_service,
        document_service,
        podcast_service.clone(),
    ));
    let library_controller = Arc::new(
        podcast_backend::controllers::podcasts::PodcastLibraryController::new(podcast_service),
    );

    // Start HTTP server with all routes
    start_http_server(pool, Arc::new(config), podcast_controller, library_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "podcast_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
