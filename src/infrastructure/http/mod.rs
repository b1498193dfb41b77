use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{
    health, podcast::PodcastController, podcasts::PodcastLibraryController, voices,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::middleware::{request_id_middleware, X_REQUEST_ID};

/// Uploaded reference documents travel in the generate request
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the application router with every route and layer
pub fn build_router(
    pool: Arc<DbPool>,
    podcast_controller: Arc<PodcastController>,
    library_controller: Arc<PodcastLibraryController>,
    cors_origins: &[String],
) -> Router {
    let generation_routes = Router::new()
        .route("/enhance", post(PodcastController::enhance))
        .route("/podcast/script", post(PodcastController::generate_script))
        .route(
            "/podcast/generate",
            post(PodcastController::generate).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/podcast/generate-from-script",
            post(PodcastController::generate_from_script),
        )
        .with_state(podcast_controller);

    let library_routes = Router::new()
        .route("/api/podcasts", get(PodcastLibraryController::list_podcasts))
        .route(
            "/api/podcasts/:id",
            get(PodcastLibraryController::get_podcast)
                .delete(PodcastLibraryController::delete_podcast),
        )
        .with_state(library_controller);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .route("/vozes", get(voices::list_voices))
        .merge(generation_routes)
        .merge(library_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors_layer(cors_origins)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let exposed = [
        HeaderName::from_static(X_REQUEST_ID),
        HeaderName::from_static("x-podcast-id"),
        HeaderName::from_static("x-duration-seconds"),
    ];

    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(exposed)
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    podcast_controller: Arc<PodcastController>,
    library_controller: Arc<PodcastLibraryController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, podcast_controller, library_controller, &config.cors_origins);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
