use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::podcast::{PodcastListResponse, PodcastResponse, PodcastService, PodcastServiceApi},
    error::AppResult,
};

/// Query for GET /api/podcasts
#[derive(Debug, Deserialize)]
pub struct ListPodcastsQuery {
    #[serde(default)]
    pub user_id: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query for DELETE /api/podcasts/{id}
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub user_id: String,
}

pub struct PodcastLibraryController {
    podcast_service: Arc<PodcastService>,
}

impl PodcastLibraryController {
    pub fn new(podcast_service: Arc<PodcastService>) -> Self {
        Self { podcast_service }
    }

    /// GET /api/podcasts - List a user's podcasts
    pub async fn list_podcasts(
        State(controller): State<Arc<PodcastLibraryController>>,
        Query(query): Query<ListPodcastsQuery>,
    ) -> AppResult<Json<PodcastListResponse>> {
        let podcasts = controller
            .podcast_service
            .list(&query.user_id, query.limit, query.offset)
            .await?;
        Ok(Json(podcasts))
    }

    /// GET /api/podcasts/{id} - Podcast metadata with a fresh audio URL
    pub async fn get_podcast(
        State(controller): State<Arc<PodcastLibraryController>>,
        Path(podcast_id): Path<Uuid>,
    ) -> AppResult<Json<PodcastResponse>> {
        let podcast = controller.podcast_service.get(podcast_id).await?;
        Ok(Json(podcast))
    }

    /// DELETE /api/podcasts/{id} - Delete podcast and audio
    pub async fn delete_podcast(
        State(controller): State<Arc<PodcastLibraryController>>,
        Path(podcast_id): Path<Uuid>,
        Query(query): Query<OwnerQuery>,
    ) -> AppResult<StatusCode> {
        controller
            .podcast_service
            .delete(podcast_id, &query.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
