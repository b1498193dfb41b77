use super::voices::{default_voice_for, resolve_voice, HostVoice};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// The multi-speaker synthesis API only accepts exactly this many speakers
pub const SYNTHESIS_SPEAKER_COUNT: usize = 2;

const DEFAULT_SCRIPT_SPEAKERS: u8 = 2;

/// Speaker label as it appears in the script, paired with a prebuilt voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice_name: String,
}

impl SpeakerVoice {
    fn for_host(host_number: u8, voice_name: &str) -> Self {
        Self {
            speaker: speaker_label(host_number),
            voice_name: voice_name.to_string(),
        }
    }
}

pub fn speaker_label(host_number: u8) -> String {
    format!("Speaker {}", host_number)
}

/// Map host voices to speaker labels, ordered by host number
pub fn build_speaker_configs(hosts: &[HostVoice]) -> Vec<SpeakerVoice> {
    let mut hosts: Vec<&HostVoice> = hosts.iter().collect();
    hosts.sort_by_key(|host| host.host_number);

    hosts
        .into_iter()
        .map(|host| SpeakerVoice::for_host(host.host_number, resolve_voice(&host.voice_id)))
        .collect()
}

/// Truncate or pad the speaker list to what the synthesis API accepts
pub fn normalize_to_two_speakers(mut speakers: Vec<SpeakerVoice>) -> Vec<SpeakerVoice> {
    if speakers.len() == SYNTHESIS_SPEAKER_COUNT {
        return speakers;
    }

    tracing::warn!(
        requested = speakers.len(),
        supported = SYNTHESIS_SPEAKER_COUNT,
        "Multi-speaker synthesis requires exactly two speakers, adjusting"
    );

    speakers.truncate(SYNTHESIS_SPEAKER_COUNT);
    while speakers.len() < SYNTHESIS_SPEAKER_COUNT {
        let host_number = speakers.len() as u8 + 1;
        speakers.push(SpeakerVoice::for_host(host_number, default_voice_for(host_number)));
    }

    speakers
}

fn speaker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"Speaker (\d+):").expect("valid speaker regex"))
}

/// Highest speaker number referenced in a script, or 2 if none is found
pub fn count_speakers(script: &str) -> u8 {
    speaker_pattern()
        .captures_iter(script)
        .filter_map(|caps| caps[1].parse::<u8>().ok())
        .max()
        .unwrap_or(DEFAULT_SCRIPT_SPEAKERS)
}

pub fn build_tts_prompt(script: &str) -> String {
    format!(
        "TTS Instructions: This is a multi-speaker podcast dialogue.\n\
         Use different voices for Speaker 1 and Speaker 2 as configured.\n\
         Read aloud naturally, respecting the dialogue format where each line starts with \"Speaker 1:\" or \"Speaker 2:\".\n\
         \n\
         Podcast Script:\n\
         {}",
        script
    )
}
