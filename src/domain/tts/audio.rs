use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 24000;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEAKING_RATE: f32 = 1.0;
pub const DEFAULT_VOLUME_GAIN_DB: f32 = 0.0;

/// Audio encodings accepted by the synthesis endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    Linear16,
    OggOpus,
}

impl AudioEncoding {
    pub const ALL: [AudioEncoding; 3] = [
        AudioEncoding::Mp3,
        AudioEncoding::Linear16,
        AudioEncoding::OggOpus,
    ];

    /// Wire name used by the provider and by clients
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "MP3",
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::OggOpus => "OGG_OPUS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == value)
    }

    /// File extension for persisted audio of this encoding
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            // Google wraps LINEAR16 output in a WAV header
            AudioEncoding::Linear16 => "wav",
            AudioEncoding::OggOpus => "ogg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::Linear16 => "audio/wav",
            AudioEncoding::OggOpus => "audio/ogg",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully-defaulted audio parameters for one synthesis call.
///
/// Both the preview and the full synthesis paths start from
/// `AudioSettings::default()` and layer client overrides on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub pitch: f32,
    pub speaking_rate: f32,
    pub volume_gain_db: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::default(),
            sample_rate_hertz: DEFAULT_SAMPLE_RATE_HERTZ,
            pitch: DEFAULT_PITCH,
            speaking_rate: DEFAULT_SPEAKING_RATE,
            volume_gain_db: DEFAULT_VOLUME_GAIN_DB,
        }
    }
}

impl AudioSettings {
    /// Apply optional overrides on top of the defaults
    pub fn with_overrides(
        encoding: Option<AudioEncoding>,
        sample_rate_hertz: Option<u32>,
        pitch: Option<f32>,
        speaking_rate: Option<f32>,
        volume_gain_db: Option<f32>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            encoding: encoding.unwrap_or(defaults.encoding),
            sample_rate_hertz: sample_rate_hertz.unwrap_or(defaults.sample_rate_hertz),
            pitch: pitch.unwrap_or(defaults.pitch),
            speaking_rate: speaking_rate.unwrap_or(defaults.speaking_rate),
            volume_gain_db: volume_gain_db.unwrap_or(defaults.volume_gain_db),
        }
    }
}
