use serde::Serialize;

pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 24_000;
pub const MONO: u16 = 1;

/// Linear PCM layout of a synthesized audio stream.
///
/// Construct through [`SampleFormat::new`] or [`parse`]; both guarantee a
/// bit depth that is a positive multiple of 8, a non-zero sample rate and a
/// byte rate that fits the 32-bit WAV header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleFormat {
    bits_per_sample: u16,
    sample_rate_hz: u32,
    channels: u16,
}

impl SampleFormat {
    /// Returns `None` when the values would produce an unplayable header.
    pub fn new(bits_per_sample: u16, sample_rate_hz: u32) -> Option<Self> {
        if !is_valid_bit_depth(bits_per_sample)
            || sample_rate_hz == 0
            || !byte_rate_fits(bits_per_sample, sample_rate_hz)
        {
            return None;
        }

        Some(Self {
            bits_per_sample,
            sample_rate_hz,
            channels: MONO,
        })
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate_hz * u32::from(self.block_align())
    }

    /// Playback length of `byte_len` bytes of PCM in this format
    pub fn duration_secs(&self, byte_len: usize) -> f64 {
        byte_len as f64 / f64::from(self.byte_rate())
    }
}

impl Default for SampleFormat {
    fn default() -> Self {
        Self {
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            channels: MONO,
        }
    }
}

fn is_valid_bit_depth(bits: u16) -> bool {
    bits > 0 && bits % 8 == 0
}

fn byte_rate_fits(bits_per_sample: u16, sample_rate_hz: u32) -> bool {
    sample_rate_hz
        .checked_mul(u32::from(MONO) * u32::from(bits_per_sample / 8))
        .is_some()
}

/// Parse an audio MIME descriptor such as `audio/L16;codec=pcm;rate=24000`.
///
/// The bit depth is read from an `L<bits>` subtype and the sample rate from a
/// `rate=` parameter (parameter names are case-insensitive). Anything missing
/// or unparsable keeps its default, so this never fails.
pub fn parse(descriptor: &str) -> SampleFormat {
    let mut bits_per_sample = DEFAULT_BITS_PER_SAMPLE;
    let mut sample_rate_hz = DEFAULT_SAMPLE_RATE_HZ;

    let mut segments = descriptor.split(';').map(str::trim);

    if let Some(bits) = segments
        .next()
        .and_then(|media_type| media_type.split_once('/'))
        .and_then(|(_, subtype)| parse_bit_depth(subtype.trim()))
    {
        bits_per_sample = bits;
    }

    for segment in segments {
        let Some((name, value)) = segment.split_once('=') else {
            continue;
        };

        if name.trim().eq_ignore_ascii_case("rate") {
            match value.trim().parse::<u32>() {
                Ok(rate) if rate > 0 => sample_rate_hz = rate,
                _ => tracing::debug!(
                    descriptor = descriptor,
                    value = value,
                    "Ignoring unparsable sample rate"
                ),
            }
        }
    }

    // The default rate fits with any valid bit depth
    if !byte_rate_fits(bits_per_sample, sample_rate_hz) {
        tracing::debug!(
            descriptor = descriptor,
            sample_rate_hz = sample_rate_hz,
            "Sample rate overflows the byte rate, using default"
        );
        sample_rate_hz = DEFAULT_SAMPLE_RATE_HZ;
    }

    SampleFormat {
        bits_per_sample,
        sample_rate_hz,
        channels: MONO,
    }
}

fn parse_bit_depth(subtype: &str) -> Option<u16> {
    let digits = subtype
        .strip_prefix('L')
        .or_else(|| subtype.strip_prefix('l'))?;

    digits
        .parse::<u16>()
        .ok()
        .filter(|bits| is_valid_bit_depth(*bits))
}

/// Whether the descriptor names linear PCM (`audio/L*` or `audio/pcm`)
pub fn is_linear_pcm(descriptor: &str) -> bool {
    let media_type = descriptor.split(';').next().unwrap_or_default().trim();
    let Some((_, subtype)) = media_type.split_once('/') else {
        return false;
    };
    let subtype = subtype.trim();

    parse_bit_depth(subtype).is_some() || subtype.eq_ignore_ascii_case("pcm")
}
