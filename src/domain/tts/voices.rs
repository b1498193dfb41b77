use serde::{Deserialize, Serialize};

pub const FALLBACK_VOICE: &str = "Zephyr";

pub const MIN_HOSTS: u8 = 1;
pub const MAX_HOSTS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    #[serde(rename = "Feminino")]
    Female,
    #[serde(rename = "Masculino")]
    Male,
}

/// A prebuilt voice offered by the synthesis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub id: &'static str,
    #[serde(rename = "nome")]
    pub name: &'static str,
    #[serde(rename = "genero")]
    pub gender: VoiceGender,
}

const fn female(id: &'static str) -> Voice {
    Voice {
        id,
        name: id,
        gender: VoiceGender::Female,
    }
}

const fn male(id: &'static str) -> Voice {
    Voice {
        id,
        name: id,
        gender: VoiceGender::Male,
    }
}

pub const AVAILABLE_VOICES: &[Voice] = &[
    female("Achernar"),
    female("Aoede"),
    female("Autonoe"),
    female("Callirrhoe"),
    female("Despina"),
    female("Erinome"),
    female("Gacrux"),
    female("Kore"),
    female("Laomedeia"),
    female("Leda"),
    female("Pulcherrima"),
    female("Sulafat"),
    female("Vindemiatrix"),
    female("Zephyr"),
    male("Achird"),
    male("Algenib"),
    male("Algieba"),
    male("Alnilam"),
    male("Charon"),
    male("Enceladus"),
    male("Fenrir"),
    male("Iapetus"),
    male("Orus"),
    male("Puck"),
    male("Rasalgethi"),
    male("Sadachbia"),
    male("Sadaltager"),
    male("Schedar"),
    male("Umbriel"),
    male("Zubenelgenubi"),
];

/// Alternates female and male voices
pub const DEFAULT_VOICES: &[&str] = &[
    "Zephyr", "Puck", "Aoede", "Charon", "Leda", "Fenrir", "Kore", "Orus", "Gacrux", "Algenib",
];

/// Voice assignment for one host of the podcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVoice {
    #[serde(rename = "hostNumber")]
    pub host_number: u8,
    #[serde(rename = "vozId")]
    pub voice_id: String,
}

pub fn is_known_voice(voice_id: &str) -> bool {
    AVAILABLE_VOICES.iter().any(|voice| voice.id == voice_id)
}

/// Returns the voice if the service knows it, otherwise the fallback voice
pub fn resolve_voice(voice_id: &str) -> &str {
    if is_known_voice(voice_id) {
        voice_id
    } else {
        FALLBACK_VOICE
    }
}

pub fn default_voice_for(host_number: u8) -> &'static str {
    let index = usize::from(host_number.saturating_sub(1)) % DEFAULT_VOICES.len();
    DEFAULT_VOICES[index]
}

pub fn default_host_voices(num_hosts: u8) -> Vec<HostVoice> {
    (1..=num_hosts)
        .map(|host_number| HostVoice {
            host_number,
            voice_id: default_voice_for(host_number).to_string(),
        })
        .collect()
}

/// Parse the `hosts_vozes` JSON form field.
///
/// Missing or invalid input falls back to the default voices; a list shorter
/// than `num_hosts` is padded with default voices for the remaining hosts.
pub fn parse_host_voices(raw: Option<&str>, num_hosts: u8) -> Vec<HostVoice> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return default_host_voices(num_hosts),
    };

    let mut voices = match serde_json::from_str::<Vec<HostVoice>>(raw) {
        Ok(voices) if voices.iter().all(is_valid_host) => voices,
        Ok(_) => {
            tracing::warn!(hosts_vozes = raw, "Host number out of range, using default voices");
            return default_host_voices(num_hosts);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse hosts_vozes, using default voices");
            return default_host_voices(num_hosts);
        }
    };

    tracing::debug!(voices = ?voices, "Voices configured");

    let mut next_host = voices.iter().map(|v| v.host_number).max().unwrap_or(0);
    while voices.len() < usize::from(num_hosts) && next_host < MAX_HOSTS {
        next_host += 1;
        voices.push(HostVoice {
            host_number: next_host,
            voice_id: DEFAULT_VOICES[0].to_string(),
        });
    }

    voices
}

fn is_valid_host(voice: &HostVoice) -> bool {
    (MIN_HOSTS..=MAX_HOSTS).contains(&voice.host_number)
}
