use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use base64::{engine::general_purpose, Engine};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::tts::{
        validate_preview_body, validate_synthesis_body, AudioReference, PreviewRequest,
        PreviewResponse, SynthesisOutcome, SynthesisResponse, SynthesizeRequest, TtsService,
        TtsServiceApi, VoicesQuery, VoicesResponse,
    },
    error::{AppError, AppResult, ContextualError},
};

pub const SYNTHESIS_ERROR_CONTEXT: &str =
    "Error occurred during TTS processing. Please check your input or try again later.";
pub const PREVIEW_ERROR_CONTEXT: &str = "Failed to generate preview.";
pub const VOICES_ERROR_CONTEXT: &str = "Failed to fetch available voices.";

/// Text length ceilings for the two synthesis endpoints
#[derive(Debug, Clone, Copy)]
pub struct TextLimits {
    pub max_text_length: usize,
    pub preview_max_text_length: usize,
}

pub struct TtsController {
    tts_service: Arc<TtsService>,
    limits: TextLimits,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>, limits: TextLimits) -> Self {
        Self {
            tts_service,
            limits,
        }
    }

    /// POST /synthesize - Convert text or SSML to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        payload: Result<Json<Value>, JsonRejection>,
    ) -> Result<Json<SynthesisResponse>, ContextualError> {
        let fail = |e: AppError| e.with_context(SYNTHESIS_ERROR_CONTEXT);

        let body = json_body(payload).map_err(fail)?;
        validate_synthesis_body(&body, controller.limits.max_text_length)
            .map_err(|e| fail(e.into()))?;
        let request: SynthesizeRequest = typed_body(body).map_err(fail)?;

        let outcome = controller
            .tts_service
            .synthesize(request.into())
            .await
            .map_err(|e| fail(e.into()))?;

        Ok(Json(format_synthesis(outcome)))
    }

    /// POST /preview - Speak a short sample with the selected voice
    pub async fn preview(
        State(controller): State<Arc<TtsController>>,
        payload: Result<Json<Value>, JsonRejection>,
    ) -> Result<Json<PreviewResponse>, ContextualError> {
        let fail = |e: AppError| e.with_context(PREVIEW_ERROR_CONTEXT);

        let body = json_body(payload).map_err(fail)?;
        validate_preview_body(&body, controller.limits.preview_max_text_length)
            .map_err(|e| fail(e.into()))?;
        let request: PreviewRequest = typed_body(body).map_err(fail)?;

        let audio = controller
            .tts_service
            .preview(request.into())
            .await
            .map_err(|e| fail(e.into()))?;

        Ok(Json(PreviewResponse {
            message: "Preview generated successfully.".to_string(),
            audio_base64: general_purpose::STANDARD.encode(audio),
        }))
    }

    /// GET /voices - List provider voices for the configured locales
    pub async fn list_voices(
        State(controller): State<Arc<TtsController>>,
        Query(query): Query<VoicesQuery>,
    ) -> Result<Json<VoicesResponse>, ContextualError> {
        let voices = controller
            .tts_service
            .list_voices(query.language_code)
            .await
            .map_err(|e| AppError::from(e).with_context(VOICES_ERROR_CONTEXT))?;

        Ok(Json(VoicesResponse { voices }))
    }
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> AppResult<Value> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

fn typed_body<T: DeserializeOwned>(body: Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))
}

/// Package a synthesis outcome into the JSON envelope; exactly one audio reference is set
pub fn format_synthesis(outcome: SynthesisOutcome) -> SynthesisResponse {
    match outcome {
        SynthesisOutcome::Inline(audio) => SynthesisResponse {
            message: "Audio generated successfully (without saving).".to_string(),
            audio: AudioReference::Inline {
                audio_base64: general_purpose::STANDARD.encode(audio),
            },
        },
        SynthesisOutcome::Saved(file) => SynthesisResponse {
            message: "Audio generated and saved successfully.".to_string(),
            audio: AudioReference::Local {
                file_name: file.file_name,
                file_path: file.path.display().to_string(),
            },
        },
        SynthesisOutcome::Uploaded(stored) => SynthesisResponse {
            message: "Audio generated successfully.".to_string(),
            audio: AudioReference::Drive {
                file_id: stored.file_id,
                web_view_link: stored.web_view_link,
                web_content_link: stored.web_content_link,
            },
        },
    }
}
