use super::api_client::ApiResponse;

/// Check the 44-byte RIFF header of a returned WAV and return its data section
pub fn assert_wav_body(response: &ApiResponse, sample_rate: u32) -> &[u8] {
    let wav = &response.body_bytes;
    assert!(wav.len() >= 44, "WAV shorter than its header: {} bytes", wav.len());

    let u16_at = |i: usize| u16::from_le_bytes([wav[i], wav[i + 1]]);
    let u32_at = |i: usize| u32::from_le_bytes([wav[i], wav[i + 1], wav[i + 2], wav[i + 3]]);

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32_at(4) as usize, wav.len() - 8, "RIFF size mismatch");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u16_at(20), 1, "Not PCM");
    assert_eq!(u16_at(22), 1, "Not mono");
    assert_eq!(u32_at(24), sample_rate);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32_at(40) as usize, wav.len() - 44, "data size mismatch");

    &wav[44..]
}

pub fn assert_wav_headers(response: &ApiResponse) {
    response.assert_header("content-type", "audio/wav");
    response.assert_header("content-disposition", "attachment; filename=podcast.wav");
    response.assert_header_exists("x-duration-seconds");
    response.assert_header_exists("x-request-id");
}
