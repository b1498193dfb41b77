use super::error::PodcastServiceError;
use super::{NewPodcast, Podcast, PodcastListResponse, PodcastResponse};
use crate::infrastructure::repositories::{AudioStorage, PodcastRepository};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

const MAX_TITLE_CHARS: usize = 500;

pub struct PodcastService {
    podcast_repo: Arc<PodcastRepository>,
    storage: Option<Arc<dyn AudioStorage>>,
    signed_url_expiration_hours: u32,
}

impl PodcastService {
    pub fn new(
        podcast_repo: Arc<PodcastRepository>,
        storage: Option<Arc<dyn AudioStorage>>,
        signed_url_expiration_hours: u32,
    ) -> Self {
        Self {
            podcast_repo,
            storage,
            signed_url_expiration_hours,
        }
    }
}

#[async_trait]
pub trait PodcastServiceApi: Send + Sync {
    /// Whether generated audio can be persisted at all
    fn storage_enabled(&self) -> bool;

    /// Upload the WAV and record its metadata
    async fn save(
        &self,
        podcast: NewPodcast,
        audio: Vec<u8>,
    ) -> Result<Podcast, PodcastServiceError>;

    /// List a user's podcasts, newest first
    async fn list(
        &self,
        user_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<PodcastListResponse, PodcastServiceError>;

    async fn get(&self, podcast_id: Uuid) -> Result<PodcastResponse, PodcastServiceError>;

    /// Delete a podcast owned by `user_id` together with its audio object
    async fn delete(&self, podcast_id: Uuid, user_id: &str) -> Result<(), PodcastServiceError>;
}

#[async_trait]
impl PodcastServiceApi for PodcastService {
    fn storage_enabled(&self) -> bool {
        self.storage.is_some()
    }

    async fn save(
        &self,
        podcast: NewPodcast,
        audio: Vec<u8>,
    ) -> Result<Podcast, PodcastServiceError> {
        let storage = self.storage()?;
        let user_id = validate_user_id(&podcast.user_id)?;
        let title = truncate_title(&podcast.title);

        let audio_size = audio.len();
        let (audio_url, audio_path) = storage
            .upload(audio, user_id, None)
            .await
            .map_err(PodcastServiceError::Dependency)?;

        let created = match self
            .podcast_repo
            .create(
                user_id,
                &title,
                podcast.theme.as_deref(),
                podcast.duration_minutes,
                &audio_url,
                &audio_path,
            )
            .await
        {
            Ok(created) => created,
            Err(e) => {
                // No row will ever point at the object
                storage.delete(&audio_path).await;
                return Err(e.into());
            }
        };

        tracing::info!(
            podcast_id = %created.id,
            user_id = user_id,
            audio_path = %audio_path,
            audio_size_bytes = audio_size,
            "Podcast saved"
        );

        Ok(created)
    }

    async fn list(
        &self,
        user_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<PodcastListResponse, PodcastServiceError> {
        let user_id = validate_user_id(user_id)?;
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0).max(0);

        let podcasts = self
            .podcast_repo
            .list_by_user(user_id, limit, offset)
            .await?;
        let total = self
            .podcast_repo
            .count_by_user(user_id)
            .await?;

        let mut responses = Vec::with_capacity(podcasts.len());
        for podcast in podcasts {
            responses.push(self.to_response(podcast).await);
        }

        Ok(PodcastListResponse {
            podcasts: responses,
            total,
            limit,
            offset,
        })
    }

    async fn get(&self, podcast_id: Uuid) -> Result<PodcastResponse, PodcastServiceError> {
        let podcast = self
            .podcast_repo
            .find_by_id(podcast_id)
            .await?
            .ok_or(PodcastServiceError::NotFound)?;

        Ok(self.to_response(podcast).await)
    }

    async fn delete(&self, podcast_id: Uuid, user_id: &str) -> Result<(), PodcastServiceError> {
        let user_id = validate_user_id(user_id)?;

        let podcast = self
            .podcast_repo
            .find_by_id(podcast_id)
            .await?
            .filter(|podcast| podcast.user_id == user_id)
            .ok_or(PodcastServiceError::NotFound)?;

        let deleted = self
            .podcast_repo
            .delete(podcast_id, user_id)
            .await?;

        if !deleted {
            return Err(PodcastServiceError::NotFound);
        }

        // The row is gone, a leftover object is only worth a warning
        if let Some(storage) = &self.storage {
            if !storage.delete(&podcast.audio_path).await {
                tracing::warn!(
                    podcast_id = %podcast_id,
                    audio_path = %podcast.audio_path,
                    "Podcast deleted but audio object could not be removed"
                );
            }
        }

        Ok(())
    }
}

impl PodcastService {
    fn storage(&self) -> Result<&Arc<dyn AudioStorage>, PodcastServiceError> {
        self.storage
            .as_ref()
            .ok_or(PodcastServiceError::StorageDisabled)
    }

    /// Private buckets need a signed URL; fall back to the stored public URL
    async fn to_response(&self, podcast: Podcast) -> PodcastResponse {
        let audio_url = match &self.storage {
            Some(storage) => match storage
                .signed_url(&podcast.audio_path, self.signed_url_expiration_hours)
                .await
            {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        audio_path = %podcast.audio_path,
                        "Failed to sign audio URL, returning public URL"
                    );
                    podcast.audio_url.clone()
                }
            },
            None => podcast.audio_url.clone(),
        };

        PodcastResponse::with_audio_url(podcast, audio_url)
    }
}

fn validate_user_id(user_id: &str) -> Result<&str, PodcastServiceError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(PodcastServiceError::Invalid("user_id is required".to_string()));
    }
    if user_id.len() > 255 || user_id.contains('/') {
        return Err(PodcastServiceError::Invalid("Invalid user_id".to_string()));
    }
    Ok(user_id)
}

fn truncate_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return "Podcast".to_string();
    }
    title.chars().take(MAX_TITLE_CHARS).collect()
}

/// Title derived from the theme when the caller gives none
pub fn title_from_theme(theme: &str) -> String {
    let first_line = theme.lines().next().unwrap_or_default().trim();
    let mut title: String = first_line.chars().take(80).collect();
    if first_line.chars().count() > 80 {
        title.push_str("...");
    }
    title
}
