use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata of a generated podcast; the WAV itself lives in object storage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Podcast {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub theme: Option<String>,
    pub duration_minutes: Option<i32>,
    pub audio_url: String,
    pub audio_path: String,
    pub created_at: DateTime<Utc>,
}
