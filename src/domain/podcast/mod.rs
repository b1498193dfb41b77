pub mod error;
pub mod model;
pub mod service;

pub use error::PodcastServiceError;
pub use model::Podcast;
pub use service::{PodcastService, PodcastServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for podcast library endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PodcastResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
}

impl PodcastResponse {
    /// Build a response that exposes `audio_url` instead of the stored public URL
    pub fn with_audio_url(podcast: Podcast, audio_url: String) -> Self {
        Self {
            id: podcast.id,
            title: podcast.title,
            theme: podcast.theme,
            duration_minutes: podcast.duration_minutes,
            audio_url,
            created_at: podcast.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PodcastListResponse {
    pub podcasts: Vec<PodcastResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Metadata for a freshly generated podcast about to be stored
#[derive(Debug, Clone)]
pub struct NewPodcast {
    pub user_id: String,
    pub title: String,
    pub theme: Option<String>,
    pub duration_minutes: Option<i32>,
}
