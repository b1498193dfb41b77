use super::error::TtsServiceError;
use super::speakers::{build_speaker_configs, build_tts_prompt, normalize_to_two_speakers, SpeakerVoice};
use super::voices::HostVoice;
use crate::domain::audio::{self, SampleFormat};
use crate::infrastructure::repositories::SynthesisRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub audio_data: Vec<u8>,
    pub format: SampleFormat,
    pub chunk_count: usize,
    pub duration_seconds: f64,
    pub speakers: Vec<SpeakerVoice>,
}

pub struct TtsService {
    synthesis_repo: Arc<dyn SynthesisRepository>,
    cache: Option<Cache<String, TtsSynthesisResult>>,
}

impl TtsService {
    pub fn new(synthesis_repo: Arc<dyn SynthesisRepository>, cache_enabled: bool) -> Self {
        // WAV files are large, keep only a handful of recent podcasts
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(20)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            synthesis_repo,
            cache,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Convert a `Speaker N:` formatted script into a WAV file
    ///
    /// This operation:
    /// - Maps host voices to the two speakers the synthesis API supports
    /// - Streams raw audio chunks from the synthesis service
    /// - Assembles them into one WAV container
    async fn generate_audio(
        &self,
        script: &str,
        hosts: &[HostVoice],
    ) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn generate_audio(
        &self,
        script: &str,
        hosts: &[HostVoice],
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        tracing::info!(
            script_length = script.len(),
            host_count = hosts.len(),
            "TTS generation request"
        );

        if script.trim().is_empty() {
            return Err(TtsServiceError::Invalid("Script cannot be empty".to_string()));
        }

        let speakers = normalize_to_two_speakers(build_speaker_configs(hosts));
        tracing::debug!(speakers = ?speakers, "Speaker voices configured");

        let cache_key = Self::cache_key(script, &speakers);
        if let Some(cache) = &self.cache {
            if let Some(cached_result) = cache.get(&cache_key).await {
                tracing::info!(
                    cached_audio_size = cached_result.audio_data.len(),
                    cached_chunk_count = cached_result.chunk_count,
                    "TTS cache hit - returning cached audio"
                );
                return Ok(cached_result);
            }
        }

        let start_time = std::time::Instant::now();
        let prompt = build_tts_prompt(script);

        let stream = self
            .synthesis_repo
            .synthesize(&prompt, &speakers)
            .await
            .map_err(TtsServiceError::Dependency)?;

        let assembled = audio::assemble_stream(stream)
            .await
            .map_err(TtsServiceError::Dependency)?;

        if assembled.chunk_count == 0 {
            tracing::error!("No audio chunks received from synthesis service");
            return Err(TtsServiceError::Dependency(
                "No audio chunks received from synthesis service".to_string(),
            ));
        }

        let duration_seconds = assembled.duration_secs();
        tracing::info!(
            latency_ms = start_time.elapsed().as_millis(),
            chunk_count = assembled.chunk_count,
            pcm_bytes = assembled.pcm_len,
            audio_size_bytes = assembled.wav.len(),
            sample_rate = assembled.format.sample_rate_hz(),
            bits_per_sample = assembled.format.bits_per_sample(),
            duration_seconds = format!("{:.2}", duration_seconds),
            "Podcast audio assembled"
        );

        let result = TtsSynthesisResult {
            audio_data: assembled.wav,
            format: assembled.format,
            chunk_count: assembled.chunk_count,
            duration_seconds,
            speakers,
        };

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, result.clone()).await;
            tracing::info!(audio_size = result.audio_data.len(), "TTS result cached");
        }

        Ok(result)
    }
}

impl TtsService {
    fn cache_key(script: &str, speakers: &[SpeakerVoice]) -> String {
        let voices: Vec<&str> = speakers.iter().map(|s| s.voice_name.as_str()).collect();
        format!("{}\n{}", voices.join(","), script)
    }
}
