use super::mime::SampleFormat;

/// Size of the canonical RIFF/WAVE header written by [`encode`]
pub const WAV_HEADER_LEN: usize = 44;

const FMT_CHUNK_LEN: u32 = 16;
/// Bytes of the RIFF chunk that follow its size field, excluding PCM
const RIFF_OVERHEAD: u32 = 36;
/// Largest payload whose RIFF size still fits in 32 bits
pub const MAX_DATA_LEN: u32 = u32::MAX - RIFF_OVERHEAD;
const FORMAT_TAG_PCM: u16 = 0x0001;

pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Wrap raw PCM in a canonical 44-byte WAV header.
///
/// All header integers are little-endian. The payload is copied untouched,
/// so odd or empty buffers are accepted. RIFF cannot describe payloads above
/// [`MAX_DATA_LEN`]; the size fields saturate there while every byte is still
/// written.
pub fn encode(pcm: &[u8], format: SampleFormat) -> Vec<u8> {
    let (riff_len, data_len) = size_fields(pcm.len());
    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

    // RIFF chunk descriptor
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&riff_len.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt subchunk
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    bytes.extend_from_slice(&FORMAT_TAG_PCM.to_le_bytes());
    bytes.extend_from_slice(&format.channels().to_le_bytes());
    bytes.extend_from_slice(&format.sample_rate_hz().to_le_bytes());
    bytes.extend_from_slice(&format.byte_rate().to_le_bytes());
    bytes.extend_from_slice(&format.block_align().to_le_bytes());
    bytes.extend_from_slice(&format.bits_per_sample().to_le_bytes());

    // data subchunk
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(pcm);

    bytes
}

fn size_fields(pcm_len: usize) -> (u32, u32) {
    let data_len = u32::try_from(pcm_len)
        .unwrap_or(MAX_DATA_LEN)
        .min(MAX_DATA_LEN);
    (RIFF_OVERHEAD + data_len, data_len)
}
