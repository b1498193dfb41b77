use super::audio_storage::{object_path, AudioStorage};
use crate::domain::audio::WAV_MIME_TYPE;
use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, primitives::ByteStream, Client as S3Client};
use std::sync::Arc;
use std::time::Duration;

/// AWS S3 implementation of audio storage
pub struct S3AudioStorage {
    s3_client: Arc<S3Client>,
    bucket: String,
    region: String,
}

impl S3AudioStorage {
    pub fn new(s3_client: Arc<S3Client>, bucket: String, region: String) -> Self {
        Self {
            s3_client,
            bucket,
            region,
        }
    }

    fn public_url(&self, object_path: &str) -> String {
        let encoded_path = object_path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, encoded_path
        )
    }
}

#[async_trait]
impl AudioStorage for S3AudioStorage {
    async fn upload(
        &self,
        audio: Vec<u8>,
        user_id: &str,
        filename: Option<&str>,
    ) -> Result<(String, String), String> {
        let path = object_path(user_id, filename);
        let size = audio.len();

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(&path)
            .content_type(WAV_MIME_TYPE)
            .body(ByteStream::from(audio))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    path = %path,
                    "S3 upload failed"
                );
                format!("Failed to upload audio: {}", e)
            })?;

        tracing::info!(
            bucket = %self.bucket,
            path = %path,
            size_bytes = size,
            "Audio uploaded"
        );

        Ok((self.public_url(&path), path))
    }

    async fn signed_url(&self, object_path: &str, expiration_hours: u32) -> Result<String, String> {
        let expires_in = Duration::from_secs(u64::from(expiration_hours.max(1)) * 3600);
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| format!("Invalid presigning config: {}", e))?;

        let request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(object_path)
            .presigned(presigning)
            .await
            .map_err(|e| format!("Failed to presign audio URL: {}", e))?;

        Ok(request.uri().to_string())
    }

    async fn delete(&self, object_path: &str) -> bool {
        match self
            .s3_client
            .delete_object()
            .bucket(&self.bucket)
            .key(object_path)
            .send()
            .await
        {
            Ok(_) => {
                tracing::info!(bucket = %self.bucket, path = object_path, "Audio deleted");
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    path = object_path,
                    "Failed to delete audio"
                );
                false
            }
        }
    }
}
