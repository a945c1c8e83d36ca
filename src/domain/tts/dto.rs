use serde::{Deserialize, Serialize};

use super::audio::{AudioEncoding, AudioSettings};
use super::voice::VoiceDescriptor;

pub const DEFAULT_PREVIEW_TEXT: &str = "This is a voice preview.";

/// Request for POST /synthesize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate_hertz: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f32>,
    #[serde(alias = "volumeGain", skip_serializing_if = "Option::is_none")]
    pub volume_gain_db: Option<f32>,
    /// `null` and absent both mean `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssml: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_without_saving: Option<bool>,
}

/// Optional audio overrides accepted by POST /preview; unknown keys are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewAudioConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_encoding: Option<AudioEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_gain_db: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate_hertz: Option<u32>,
}

/// Request for POST /preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_config: Option<PreviewAudioConfig>,
}

/// Query for GET /voices
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicesQuery {
    pub language_code: Option<String>,
}

/// What the provider should speak. Plain text and SSML are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechInput {
    Text(String),
    Ssml(String),
}

impl SpeechInput {
    pub fn content(&self) -> &str {
        match self {
            SpeechInput::Text(text) | SpeechInput::Ssml(text) => text,
        }
    }

    pub fn is_ssml(&self) -> bool {
        matches!(self, SpeechInput::Ssml(_))
    }
}

/// Normalized, fully-defaulted synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub input: SpeechInput,
    pub voice: String,
    pub language_code: Option<String>,
    pub audio: AudioSettings,
    pub play_without_saving: bool,
}

impl From<SynthesizeRequest> for SynthesisRequest {
    fn from(request: SynthesizeRequest) -> Self {
        let input = if request.ssml.unwrap_or(false) {
            SpeechInput::Ssml(request.text)
        } else {
            SpeechInput::Text(request.text)
        };

        Self {
            input,
            voice: request.voice,
            language_code: request.language_code,
            audio: AudioSettings::with_overrides(
                request.format,
                request.sample_rate_hertz,
                request.pitch,
                request.speaking_rate,
                request.volume_gain_db,
            ),
            play_without_saving: request.play_without_saving.unwrap_or(false),
        }
    }
}

impl From<PreviewRequest> for SynthesisRequest {
    fn from(request: PreviewRequest) -> Self {
        let config = request.audio_config.unwrap_or_default();
        let text = request
            .text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PREVIEW_TEXT.to_string());

        Self {
            input: SpeechInput::Text(text),
            voice: request.voice,
            language_code: request.language_code,
            audio: AudioSettings::with_overrides(
                config.audio_encoding,
                config.sample_rate_hertz,
                config.pitch,
                config.speaking_rate,
                config.volume_gain_db,
            ),
            play_without_saving: true,
        }
    }
}

/// Where the generated audio ended up. Exactly one reference per response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AudioReference {
    Drive {
        #[serde(rename = "fileId")]
        file_id: String,
        #[serde(rename = "webViewLink", skip_serializing_if = "Option::is_none")]
        web_view_link: Option<String>,
        #[serde(rename = "webContentLink", skip_serializing_if = "Option::is_none")]
        web_content_link: Option<String>,
    },
    Local {
        #[serde(rename = "fileName")]
        file_name: String,
        #[serde(rename = "filePath")]
        file_path: String,
    },
    Inline {
        #[serde(rename = "audioBase64")]
        audio_base64: String,
    },
}

/// Response for POST /synthesize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResponse {
    pub message: String,
    #[serde(flatten)]
    pub audio: AudioReference,
}

/// Response for POST /preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub message: String,
    pub audio_base64: String,
}

/// Response for GET /voices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceDescriptor>,
}
