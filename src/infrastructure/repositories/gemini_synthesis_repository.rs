use super::gemini_types::{
    GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig, MultiSpeakerVoiceConfig,
    PrebuiltVoiceConfig, SpeakerVoiceConfig, SpeechConfig, TextPart, VoiceConfig,
};
use super::synthesis_repository::{AudioChunkStream, SynthesisRepository};
use crate::domain::audio::AudioChunk;
use crate::domain::tts::SpeakerVoice;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;

/// Gemini streaming TTS implementation of the synthesis repository
pub struct GeminiSynthesisRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiSynthesisRepository {
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn build_request<'a>(prompt: &'a str, speakers: &'a [SpeakerVoice]) -> GeminiRequest<'a> {
    let speaker_voice_configs = speakers
        .iter()
        .map(|s| SpeakerVoiceConfig {
            speaker: &s.speaker,
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: &s.voice_name,
                },
            },
        })
        .collect();

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts: vec![TextPart { text: prompt }],
        }],
        generation_config: Some(GenerationConfig {
            temperature: 1.0,
            response_modalities: vec!["audio"],
            speech_config: Some(SpeechConfig {
                multi_speaker_voice_config: MultiSpeakerVoiceConfig {
                    speaker_voice_configs,
                },
            }),
        }),
    }
}

#[async_trait]
impl SynthesisRepository for GeminiSynthesisRepository {
    async fn synthesize(
        &self,
        prompt: &str,
        speakers: &[SpeakerVoice],
    ) -> Result<AudioChunkStream, String> {
        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            speaker_count = speakers.len(),
            "Starting Gemini speech synthesis"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(prompt, speakers))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %self.model, "Gemini TTS request failed");
                format!("Gemini TTS request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                error = %error_text,
                "Gemini TTS returned an error"
            );
            return Err(format!("Gemini TTS error {}: {}", status.as_u16(), error_text));
        }

        let bytes = response
            .bytes_stream()
            .map(|item| item.map(|b| b.to_vec()).map_err(|e| e.to_string()))
            .boxed();

        Ok(audio_chunks(bytes))
    }
}

/// Turn a raw SSE byte stream into audio chunks, skipping events without audio
fn audio_chunks(bytes: BoxStream<'static, Result<Vec<u8>, String>>) -> AudioChunkStream {
    struct State {
        bytes: BoxStream<'static, Result<Vec<u8>, String>>,
        decoder: SseDecoder,
        pending: VecDeque<Result<AudioChunk, String>>,
        done: bool,
    }

    impl State {
        fn enqueue(&mut self, payloads: Vec<String>) {
            for payload in payloads {
                match decode_event(&payload) {
                    Ok(Some(chunk)) => self.pending.push_back(Ok(chunk)),
                    Ok(None) => tracing::debug!("Skipping SSE event without inline audio"),
                    Err(e) => {
                        self.pending.push_back(Err(e));
                        self.done = true;
                        return;
                    }
                }
            }
        }
    }

    let state = State {
        bytes,
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.done {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    let payloads = state.decoder.push(&bytes);
                    state.enqueue(payloads);
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Gemini TTS stream interrupted");
                    state
                        .pending
                        .push_back(Err(format!("Gemini TTS stream interrupted: {}", e)));
                    state.done = true;
                }
                None => {
                    let payloads = state.decoder.finish();
                    state.enqueue(payloads);
                    state.done = true;
                }
            }
        }
    })
    .boxed()
}

/// Decode one SSE `data:` payload; `Ok(None)` when it carries no audio
fn decode_event(payload: &str) -> Result<Option<AudioChunk>, String> {
    let event: GeminiResponse = serde_json::from_str(payload)
        .map_err(|e| format!("Malformed Gemini TTS event: {}", e))?;

    if let Some(error) = &event.error {
        return Err(format!(
            "Gemini TTS error {}: {}",
            error.code.unwrap_or_default(),
            error.message
        ));
    }

    let Some(inline) = event.inline_data() else {
        return Ok(None);
    };

    let data = STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| format!("Invalid base64 audio payload: {}", e))?;

    Ok(Some(AudioChunk {
        mime_type: inline.mime_type.clone(),
        data,
    }))
}

/// Incremental `text/event-stream` parser yielding the data of complete events
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no newline
    scanned: usize,
    data_lines: Vec<String>,
}

impl SseDecoder {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut line_start = 0;
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
            let newline = self.scanned + offset;
            let mut line = &self.buffer[line_start..newline];
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            let line = String::from_utf8_lossy(line).into_owned();
            self.handle_line(&line, &mut events);

            line_start = newline + 1;
            self.scanned = line_start;
        }

        self.buffer.drain(..line_start);
        self.scanned = self.buffer.len();
        events
    }

    /// Flush whatever the stream ended with
    fn finish(&mut self) -> Vec<String> {
        let mut events = Vec::new();
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.scanned = 0;
            let line = String::from_utf8_lossy(&rest);
            self.handle_line(line.trim_end_matches('\r'), &mut events);
        }
        self.dispatch(&mut events);
        events
    }

    fn handle_line(&mut self, line: &str, events: &mut Vec<String>) {
        if line.is_empty() {
            self.dispatch(events);
        } else if let Some(data) = line.strip_prefix("data:") {
            self.data_lines
                .push(data.strip_prefix(' ').unwrap_or(data).to_string());
        }
        // Other SSE fields are ignored
    }

    fn dispatch(&mut self, events: &mut Vec<String>) {
        if !self.data_lines.is_empty() {
            events.push(self.data_lines.join("\n"));
            self.data_lines.clear();
        }
    }
}
