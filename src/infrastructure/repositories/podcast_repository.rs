use crate::infrastructure::db::DbPool;
use crate::{domain::podcast::Podcast, error::AppResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct PodcastRepository {
    pool: Arc<DbPool>,
}

impl PodcastRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Insert a podcast and return the stored row
    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        theme: Option<&str>,
        duration_minutes: Option<i32>,
        audio_url: &str,
        audio_path: &str,
    ) -> AppResult<Podcast> {
        let pool = self.pool.as_ref();
        let podcast = sqlx::query_as::<_, Podcast>(
            r#"
            INSERT INTO podcasts (id, user_id, title, theme, duration_minutes, audio_url, audio_path, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, theme, duration_minutes, audio_url, audio_path, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .bind(theme)
        .bind(duration_minutes)
        .bind(audio_url)
        .bind(audio_path)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(podcast)
    }

    /// A page of a user's podcasts, newest first
    pub async fn list_by_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Podcast>> {
        let pool = self.pool.as_ref();
        let podcasts = sqlx::query_as::<_, Podcast>(
            r#"
            SELECT id, user_id, title, theme, duration_minutes, audio_url, audio_path, created_at
            FROM podcasts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(podcasts)
    }

    pub async fn find_by_id(&self, podcast_id: Uuid) -> AppResult<Option<Podcast>> {
        let pool = self.pool.as_ref();
        let podcast = sqlx::query_as::<_, Podcast>(
            r#"
            SELECT id, user_id, title, theme, duration_minutes, audio_url, audio_path, created_at
            FROM podcasts
            WHERE id = $1
            "#,
        )
        .bind(podcast_id)
        .fetch_optional(pool)
        .await?;

        Ok(podcast)
    }

    /// Delete a podcast only if it belongs to `user_id`
    pub async fn delete(&self, podcast_id: Uuid, user_id: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM podcasts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(podcast_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM podcasts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
