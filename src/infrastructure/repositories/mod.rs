pub mod audio_storage;
pub mod gemini_synthesis_repository;
pub mod gemini_text_repository;
pub mod gemini_types;
pub mod openai_text_repository;
pub mod podcast_repository;
pub mod s3_audio_storage;
pub mod synthesis_repository;
pub mod text_generation_repository;

pub use audio_storage::AudioStorage;
pub use gemini_synthesis_repository::GeminiSynthesisRepository;
pub use gemini_text_repository::GeminiTextRepository;
pub use openai_text_repository::OpenAiTextRepository;
pub use podcast_repository::PodcastRepository;
pub use s3_audio_storage::S3AudioStorage;
pub use synthesis_repository::{AudioChunkStream, SynthesisRepository};
pub use text_generation_repository::TextGenerationRepository;
