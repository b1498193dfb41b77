pub mod error;
pub mod service;
pub mod speakers;
pub mod voices;

pub use error::TtsServiceError;
pub use service::{TtsService, TtsServiceApi, TtsSynthesisResult};
pub use speakers::{build_speaker_configs, count_speakers, SpeakerVoice};
pub use voices::{default_host_voices, parse_host_voices, HostVoice, Voice, AVAILABLE_VOICES};
