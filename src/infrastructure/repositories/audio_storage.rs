use async_trait::async_trait;

/// Object storage for generated podcast audio
#[async_trait]
pub trait AudioStorage: Send + Sync {
    /// Store a WAV under `podcasts/{user_id}/{filename}`
    ///
    /// Returns `(public_url, object_path)`. A random `{uuid}.wav` name is used
    /// when `filename` is `None`.
    async fn upload(
        &self,
        audio: Vec<u8>,
        user_id: &str,
        filename: Option<&str>,
    ) -> Result<(String, String), String>;

    /// Time limited download URL for a private object
    async fn signed_url(&self, object_path: &str, expiration_hours: u32) -> Result<String, String>;

    /// Remove an object; `false` when the deletion failed
    async fn delete(&self, object_path: &str) -> bool;
}

/// Object key for a user's podcast
pub fn object_path(user_id: &str, filename: Option<&str>) -> String {
    let filename = match filename {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => format!("{}.wav", uuid::Uuid::new_v4()),
    };
    format!("podcasts/{}/{}", user_id, filename)
}
