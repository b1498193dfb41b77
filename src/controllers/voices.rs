use axum::Json;
use serde::Serialize;

use crate::domain::tts::{Voice, AVAILABLE_VOICES};

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub vozes: &'static [Voice],
}

/// GET /vozes - Voices available for podcast hosts
pub async fn list_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        vozes: AVAILABLE_VOICES,
    })
}
