use super::error::ProviderError;
use super::tts_repository::TtsRepository;
use crate::domain::tts::{
    resolve_language_code, AudioEncoding, SpeechInput, SynthesisRequest, VoiceDescriptor,
};
use crate::infrastructure::oauth::{GoogleTokenProvider, CLOUD_PLATFORM_SCOPE};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_TTS_API_BASE_URL: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum InputPayload {
    Text(String),
    Ssml(String),
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct VoicePayload {
    name: String,
    language_code: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct AudioConfigPayload {
    audio_encoding: AudioEncoding,
    sample_rate_hertz: u32,
    pitch: f32,
    speaking_rate: f32,
    volume_gain_db: f32,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SynthesizePayload {
    input: InputPayload,
    voice: VoicePayload,
    audio_config: AudioConfigPayload,
}

impl SynthesizePayload {
    fn from_request(request: &SynthesisRequest) -> Self {
        let input = match &request.input {
            SpeechInput::Text(text) => InputPayload::Text(text.clone()),
            SpeechInput::Ssml(ssml) => InputPayload::Ssml(ssml.clone()),
        };

        Self {
            input,
            voice: VoicePayload {
                name: request.voice.clone(),
                language_code: resolve_language_code(
                    request.language_code.as_deref(),
                    &request.voice,
                ),
            },
            audio_config: AudioConfigPayload {
                audio_encoding: request.audio.encoding,
                sample_rate_hertz: request.audio.sample_rate_hertz,
                pitch: request.audio.pitch,
                speaking_rate: request.audio.speaking_rate,
                volume_gain_db: request.audio.volume_gain_db,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct ListVoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceDescriptor>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Google Cloud Text-to-Speech implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    token_provider: Arc<GoogleTokenProvider>,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(
        http_client: reqwest::Client,
        token_provider: Arc<GoogleTokenProvider>,
        base_url: String,
    ) -> Self {
        Self {
            http_client,
            token_provider,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn read_error(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        classify_error(status, &body)
    }
}

/// Map a non-success provider response onto a `ProviderError`, keeping the message verbatim
fn classify_error(status: StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<GoogleErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                format!("Google TTS returned status {}", status.as_u16())
            } else {
                body.trim().to_string()
            }
        });

    let lowered = message.to_lowercase();
    if status == StatusCode::BAD_REQUEST && lowered.contains("ssml") && lowered.contains("support") {
        return ProviderError::SsmlUnsupported(message);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Upstream(format!("Google TTS rejected credentials: {}", message))
        }
        _ => ProviderError::Upstream(message),
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        let start_time = std::time::Instant::now();
        let payload = SynthesizePayload::from_request(request);

        tracing::info!(
            voice = %payload.voice.name,
            language_code = %payload.voice.language_code,
            audio_encoding = %request.audio.encoding,
            sample_rate_hertz = request.audio.sample_rate_hertz,
            ssml = request.input.is_ssml(),
            text_length = request.input.content().chars().count(),
            "Calling Google TTS text:synthesize"
        );

        let token = self.token_provider.access_token(CLOUD_PLATFORM_SCOPE).await?;

        let response = self
            .http_client
            .post(format!("{}/v1/text:synthesize", self.base_url))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = %payload.voice.name, "Google TTS request failed");
                ProviderError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let err = Self::read_error(response).await;
            tracing::error!(error = %err, voice = %payload.voice.name, "Google TTS synthesize failed");
            return Err(err);
        }

        let body: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(format!("Failed to parse TTS response: {}", e)))?;

        if body.audio_content.is_empty() {
            return Err(ProviderError::Upstream(
                "No audio content returned by TTS API".to_string(),
            ));
        }

        let audio = general_purpose::STANDARD
            .decode(body.audio_content.as_bytes())
            .map_err(|e| ProviderError::Upstream(format!("Failed to decode base64 audio: {}", e)))?;

        tracing::info!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }

    async fn list_voices(
        &self,
        language_code: Option<&str>,
    ) -> Result<Vec<VoiceDescriptor>, ProviderError> {
        let token = self.token_provider.access_token(CLOUD_PLATFORM_SCOPE).await?;

        let mut request = self
            .http_client
            .get(format!("{}/v1/voices", self.base_url))
            .bearer_auth(token);
        if let Some(code) = language_code {
            request = request.query(&[("languageCode", code)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: ListVoicesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(format!("Failed to parse voice list: {}", e)))?;

        tracing::debug!(voice_count = body.voices.len(), "Voice catalog fetched");
        Ok(body.voices)
    }
}
