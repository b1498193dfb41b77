use crate::domain::audio::AudioChunk;
use crate::domain::tts::SpeakerVoice;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Audio chunks in arrival order; an `Err` item ends the synthesis
pub type AudioChunkStream = BoxStream<'static, Result<AudioChunk, String>>;

/// Repository for multi-speaker speech synthesis.
/// Abstracts the underlying TTS provider
///
/// Implementations are responsible for:
/// - Mapping speaker labels to provider voices
/// - Streaming raw audio chunks with their MIME descriptors as they arrive
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Start synthesizing `prompt` with one voice per speaker label
    ///
    /// # Errors
    /// Returns error if the request is rejected before any audio is streamed
    async fn synthesize(
        &self,
        prompt: &str,
        speakers: &[SpeakerVoice],
    ) -> Result<AudioChunkStream, String>;
}
