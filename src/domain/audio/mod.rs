//! Audio assembly pipeline: turns the chunked raw-PCM response of the
//! synthesis service into one playable WAV file.

pub mod accumulator;
pub mod mime;
pub mod wav;

pub use accumulator::{accumulate, accumulate_stream, AccumulatedAudio, AudioChunk, ChunkAccumulator};
pub use mime::SampleFormat;
pub use wav::{encode, WAV_HEADER_LEN, WAV_MIME_TYPE};

use futures::Stream;

/// A complete WAV file and what went into it
#[derive(Debug, Clone)]
pub struct AssembledAudio {
    pub wav: Vec<u8>,
    pub format: SampleFormat,
    pub chunk_count: usize,
    pub pcm_len: usize,
}

impl AssembledAudio {
    fn from_accumulated(audio: AccumulatedAudio) -> Self {
        Self {
            wav: wav::encode(&audio.pcm, audio.format),
            format: audio.format,
            chunk_count: audio.chunk_count,
            pcm_len: audio.pcm.len(),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.format.duration_secs(self.pcm_len)
    }
}

/// Accumulate an in-memory chunk sequence and wrap it as WAV
pub fn assemble<I>(chunks: I) -> Vec<u8>
where
    I: IntoIterator<Item = AudioChunk>,
{
    let (pcm, format) = accumulate(chunks);
    wav::encode(&pcm, format)
}

/// Stream counterpart of [`assemble`]; no WAV is produced if the stream fails
pub async fn assemble_stream<S, E>(stream: S) -> Result<AssembledAudio, E>
where
    S: Stream<Item = Result<AudioChunk, E>>,
{
    let audio = accumulate_stream(stream).await?;
    Ok(AssembledAudio::from_accumulated(audio))
}
