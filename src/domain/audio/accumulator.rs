use super::mime::{self, SampleFormat};
use futures::{Stream, StreamExt};

/// One unit of a streamed synthesis response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl AudioChunk {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: Some(mime_type.into()),
            data,
        }
    }

    pub fn untyped(data: Vec<u8>) -> Self {
        Self {
            mime_type: None,
            data,
        }
    }
}

/// PCM payload of a whole synthesis session plus the format it was declared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatedAudio {
    pub pcm: Vec<u8>,
    pub format: SampleFormat,
    pub chunk_count: usize,
}

/// Sequential fold over the chunks of one synthesis session.
///
/// Bytes are appended in arrival order without any re-encoding. The first
/// descriptor seen fixes the format for the session; later descriptors that
/// disagree are ignored.
#[derive(Debug, Default)]
pub struct ChunkAccumulator {
    pcm: Vec<u8>,
    format: Option<SampleFormat>,
    chunk_count: usize,
}

impl ChunkAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: AudioChunk) {
        if let Some(descriptor) = chunk.mime_type.as_deref() {
            self.observe_descriptor(descriptor);
        }

        self.pcm.extend_from_slice(&chunk.data);
        self.chunk_count += 1;
    }

    fn observe_descriptor(&mut self, descriptor: &str) {
        if !mime::is_linear_pcm(descriptor) {
            tracing::warn!(
                mime_type = descriptor,
                chunk_index = self.chunk_count,
                "Chunk is not declared as linear PCM, appending raw bytes"
            );
        }

        let parsed = mime::parse(descriptor);
        match self.format {
            None => self.format = Some(parsed),
            Some(resolved) if resolved != parsed => {
                tracing::debug!(
                    mime_type = descriptor,
                    resolved = ?resolved,
                    chunk_index = self.chunk_count,
                    "Chunk format differs from first seen format, keeping first"
                );
            }
            Some(_) => {}
        }
    }

    pub fn len(&self) -> usize {
        self.pcm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pcm.is_empty()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn finish(self) -> AccumulatedAudio {
        AccumulatedAudio {
            pcm: self.pcm,
            format: self.format.unwrap_or_default(),
            chunk_count: self.chunk_count,
        }
    }
}

/// Concatenate an in-memory chunk sequence
pub fn accumulate<I>(chunks: I) -> (Vec<u8>, SampleFormat)
where
    I: IntoIterator<Item = AudioChunk>,
{
    let mut accumulator = ChunkAccumulator::new();
    for chunk in chunks {
        accumulator.push(chunk);
    }

    let audio = accumulator.finish();
    (audio.pcm, audio.format)
}

/// Drain a synthesis stream, stopping at the first upstream error.
///
/// The partial buffer is dropped on error, and dropping the returned future
/// stops pulling from the stream.
pub async fn accumulate_stream<S, E>(stream: S) -> Result<AccumulatedAudio, E>
where
    S: Stream<Item = Result<AudioChunk, E>>,
{
    futures::pin_mut!(stream);

    let mut accumulator = ChunkAccumulator::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        tracing::debug!(
            chunk_index = accumulator.chunk_count(),
            chunk_size = chunk.data.len(),
            "Audio chunk received"
        );
        accumulator.push(chunk);
    }

    Ok(accumulator.finish())
}
