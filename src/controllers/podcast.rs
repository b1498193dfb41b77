use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        audio::WAV_MIME_TYPE,
        document::{enrich_theme, DocumentService, UploadedDocument},
        podcast::{service::title_from_theme, NewPodcast, PodcastService, PodcastServiceApi},
        script::{ScriptService, ScriptServiceApi},
        tts::{
            count_speakers, parse_host_voices,
            voices::{MAX_HOSTS, MIN_HOSTS},
            TtsService, TtsServiceApi, TtsSynthesisResult,
        },
    },
    error::{AppError, AppResult},
};

pub const DEFAULT_DURATION_MINUTES: u8 = 3;
pub const MIN_DURATION_MINUTES: u8 = 1;
pub const MAX_DURATION_MINUTES: u8 = 60;
pub const DEFAULT_NUM_HOSTS: u8 = 2;

const PODCAST_FILENAME: &str = "podcast.wav";

/// Request for POST /enhance
#[derive(Debug, Deserialize)]
pub struct EnhanceForm {
    #[serde(default)]
    pub texto: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub texto_original: String,
    pub texto_aprimorado: String,
}

/// Request for POST /podcast/script
#[derive(Debug, Deserialize)]
pub struct ScriptForm {
    #[serde(default)]
    pub tema: String,
    pub duracao_minutos: Option<String>,
    pub num_hosts: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub script: String,
}

/// Request for POST /podcast/generate-from-script
#[derive(Debug, Deserialize)]
pub struct FromScriptForm {
    #[serde(default)]
    pub script: String,
    pub hosts_vozes: Option<String>,
}

/// Fields of the multipart POST /podcast/generate request
#[derive(Debug, Default)]
struct GenerateRequest {
    tema: String,
    duracao_minutos: Option<String>,
    num_hosts: Option<String>,
    hosts_vozes: Option<String>,
    user_id: Option<String>,
    titulo: Option<String>,
    documentos: Vec<UploadedDocument>,
}

impl GenerateRequest {
    async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut request = GenerateRequest::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "documentos" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content = field.bytes().await?;
                    // Browsers send an empty part when no file was picked
                    if filename.is_empty() && content.is_empty() {
                        continue;
                    }
                    request.documentos.push(UploadedDocument {
                        filename,
                        content: content.to_vec(),
                    });
                }
                "tema" => request.tema = field.text().await?,
                "duracao_minutos" => request.duracao_minutos = Some(field.text().await?),
                "num_hosts" => request.num_hosts = Some(field.text().await?),
                "hosts_vozes" => request.hosts_vozes = Some(field.text().await?),
                "user_id" => request.user_id = Some(field.text().await?),
                "titulo" => request.titulo = Some(field.text().await?),
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(request)
    }
}

pub struct PodcastController {
    script_service: Arc<ScriptService>,
    tts_service: Arc<TtsService>,
    document_service: Arc<DocumentService>,
    podcast_service: Arc<PodcastService>,
}

impl PodcastController {
    pub fn new(
        script_service: Arc<ScriptService>,
        tts_service: Arc<TtsService>,
        document_service: Arc<DocumentService>,
        podcast_service: Arc<PodcastService>,
    ) -> Self {
        Self {
            script_service,
            tts_service,
            document_service,
            podcast_service,
        }
    }

    /// POST /enhance - Expand a short idea into a podcast brief
    pub async fn enhance(
        State(controller): State<Arc<PodcastController>>,
        Form(form): Form<EnhanceForm>,
    ) -> AppResult<Json<EnhanceResponse>> {
        if form.texto.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        let enhanced = controller.script_service.enhance_text(&form.texto).await?;

        Ok(Json(EnhanceResponse {
            texto_original: form.texto,
            texto_aprimorado: enhanced,
        }))
    }

    /// POST /podcast/script - Generate only the dialogue script
    pub async fn generate_script(
        State(controller): State<Arc<PodcastController>>,
        Form(form): Form<ScriptForm>,
    ) -> AppResult<Json<ScriptResponse>> {
        let theme = require_theme(&form.tema)?;
        let duration_minutes = parse_duration(form.duracao_minutos.as_deref())?;
        let num_hosts = parse_num_hosts(form.num_hosts.as_deref())?;

        let script = controller
            .script_service
            .generate_script(theme, duration_minutes, num_hosts)
            .await?;

        Ok(Json(ScriptResponse { script }))
    }

    /// POST /podcast/generate - Theme and documents in, WAV out
    pub async fn generate(
        State(controller): State<Arc<PodcastController>>,
        multipart: Multipart,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let request = GenerateRequest::from_multipart(multipart).await?;

        let theme = require_theme(&request.tema)?;
        let duration_minutes = parse_duration(request.duracao_minutos.as_deref())?;
        let num_hosts = parse_num_hosts(request.num_hosts.as_deref())?;

        tracing::info!(
            duration_minutes = duration_minutes,
            num_hosts = num_hosts,
            document_count = request.documentos.len(),
            persist = request.user_id.is_some(),
            "Podcast generation request"
        );

        let enriched_theme = if request.documentos.is_empty() {
            theme.to_string()
        } else {
            // PDF and Office parsing is CPU bound
            let document_service = controller.document_service.clone();
            let documents = request.documentos;
            let documents_content = tokio::task::spawn_blocking(move || {
                document_service.combine_documents(&documents)
            })
            .await
            .map_err(|e| AppError::Internal(format!("Document extraction failed: {}", e)))?;
            enrich_theme(theme, &documents_content)
        };

        let script = controller
            .script_service
            .generate_script(&enriched_theme, duration_minutes, num_hosts)
            .await?;

        let hosts = parse_host_voices(request.hosts_vozes.as_deref(), num_hosts);
        let result = controller.tts_service.generate_audio(&script, &hosts).await?;

        let mut headers = wav_headers(&result)?;

        if let Some(user_id) = request.user_id.as_deref().filter(|id| !id.trim().is_empty()) {
            let title = request
                .titulo
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| title_from_theme(theme));
            let new_podcast = NewPodcast {
                user_id: user_id.to_string(),
                title,
                theme: Some(theme.to_string()),
                duration_minutes: Some(i32::from(duration_minutes)),
            };

            if let Some(podcast_id) = controller.persist(new_podcast, &result).await {
                headers.insert("X-Podcast-Id", header_value(&podcast_id.to_string())?);
            }
        }

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }

    /// POST /podcast/generate-from-script - Synthesize an existing script
    pub async fn generate_from_script(
        State(controller): State<Arc<PodcastController>>,
        Form(form): Form<FromScriptForm>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        if form.script.trim().is_empty() {
            return Err(AppError::BadRequest("Script cannot be empty".to_string()));
        }

        let num_hosts = count_speakers(&form.script).clamp(MIN_HOSTS, MAX_HOSTS);
        let hosts = parse_host_voices(form.hosts_vozes.as_deref(), num_hosts);

        let result = controller
            .tts_service
            .generate_audio(&form.script, &hosts)
            .await?;

        let headers = wav_headers(&result)?;
        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }

    /// Storing is best effort: the listener still gets the audio if it fails
    async fn persist(
        &self,
        podcast: NewPodcast,
        result: &TtsSynthesisResult,
    ) -> Option<uuid::Uuid> {
        if !self.podcast_service.storage_enabled() {
            tracing::warn!("user_id given but audio storage is not configured, skipping save");
            return None;
        }

        match self
            .podcast_service
            .save(podcast, result.audio_data.clone())
            .await
        {
            Ok(saved) => Some(saved.id),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save generated podcast");
                None
            }
        }
    }
}

fn require_theme(theme: &str) -> AppResult<&str> {
    let theme = theme.trim();
    if theme.is_empty() {
        return Err(AppError::BadRequest("Theme cannot be empty".to_string()));
    }
    Ok(theme)
}

fn parse_duration(raw: Option<&str>) -> AppResult<u8> {
    parse_bounded(
        "duracao_minutos",
        raw,
        DEFAULT_DURATION_MINUTES,
        MIN_DURATION_MINUTES,
        MAX_DURATION_MINUTES,
    )
}

fn parse_num_hosts(raw: Option<&str>) -> AppResult<u8> {
    parse_bounded("num_hosts", raw, DEFAULT_NUM_HOSTS, MIN_HOSTS, MAX_HOSTS)
}

/// Integer form field within `[min, max]`; absent or blank means `default`
fn parse_bounded(field: &str, raw: Option<&str>, default: u8, min: u8, max: u8) -> AppResult<u8> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(default),
    };

    let out_of_range =
        || AppError::BadRequest(format!("{} must be between {} and {}", field, min, max));

    let value: i64 = raw.parse().map_err(|_| out_of_range())?;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(out_of_range());
    }

    u8::try_from(value).map_err(|_| out_of_range())
}

fn wav_headers(result: &TtsSynthesisResult) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(WAV_MIME_TYPE));
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(&format!("attachment; filename={}", PODCAST_FILENAME))?,
    );
    headers.insert(
        "X-Duration-Seconds",
        header_value(&format!("{:.2}", result.duration_seconds))?,
    );
    headers.insert("X-Chunk-Count", HeaderValue::from(result.chunk_count));
    headers.insert(
        "X-Sample-Rate",
        HeaderValue::from(result.format.sample_rate_hz()),
    );
    Ok(headers)
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("Invalid header value: {}", e)))
}
