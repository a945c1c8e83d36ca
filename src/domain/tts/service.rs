use super::dto::SynthesisRequest;
use super::error::TtsServiceError;
use super::voice::{filter_by_locales, VoiceDescriptor};
use crate::domain::tts::AudioEncoding;
use crate::infrastructure::repositories::{
    AudioFileStore, StorageRepository, StoredAudio, TransientAudioFile, TtsRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Where the audio of one synthesis request ended up
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    /// Returned to the caller without touching the filesystem
    Inline(Vec<u8>),
    /// Kept as a local file (no remote storage configured)
    Saved(TransientAudioFile),
    Uploaded(StoredAudio),
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    storage_repo: Option<Arc<dyn StorageRepository>>,
    file_store: Arc<AudioFileStore>,
    keep_local_after_upload: bool,
    voice_locales: Vec<String>,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        storage_repo: Option<Arc<dyn StorageRepository>>,
        file_store: Arc<AudioFileStore>,
        keep_local_after_upload: bool,
        voice_locales: Vec<String>,
    ) -> Self {
        Self {
            tts_repo,
            storage_repo,
            file_store,
            keep_local_after_upload,
            voice_locales,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize a validated, fully-defaulted request
    ///
    /// This operation:
    /// - Calls the speech provider once (no retries)
    /// - Returns the bytes inline when `play_without_saving` is set
    /// - Otherwise writes a transient file and uploads it when storage is configured
    ///
    /// Any transient file created for the request is removed if a later step fails.
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutcome, TtsServiceError>;

    /// Synthesize a short preview; never touches the filesystem
    async fn preview(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsServiceError>;

    /// Voices from the provider catalog, narrowed to the configured locales
    async fn list_voices(
        &self,
        language_code: Option<String>,
    ) -> Result<Vec<VoiceDescriptor>, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutcome, TtsServiceError> {
        tracing::info!(
            voice = %request.voice,
            ssml = request.input.is_ssml(),
            text_length = request.input.content().chars().count(),
            format = %request.audio.encoding,
            play_without_saving = request.play_without_saving,
            "TTS synthesis request"
        );

        let audio = self.call_provider(&request).await?;

        if request.play_without_saving {
            return Ok(SynthesisOutcome::Inline(audio));
        }

        self.persist(&audio, request.audio.encoding).await
    }

    async fn preview(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsServiceError> {
        tracing::info!(
            voice = %request.voice,
            language_code = ?request.language_code,
            "TTS preview request"
        );

        self.call_provider(&request).await
    }

    async fn list_voices(
        &self,
        language_code: Option<String>,
    ) -> Result<Vec<VoiceDescriptor>, TtsServiceError> {
        let voices = self
            .tts_repo
            .list_voices(language_code.as_deref())
            .await
            .map_err(TtsServiceError::from_catalog)?;

        let total = voices.len();
        let voices = filter_by_locales(voices, &self.voice_locales);

        tracing::info!(
            total_voices = total,
            returned_voices = voices.len(),
            locales = ?self.voice_locales,
            "Voice catalog filtered"
        );

        Ok(voices)
    }
}

impl TtsService {
    async fn call_provider(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TtsServiceError> {
        self.tts_repo
            .synthesize(request)
            .await
            .map_err(TtsServiceError::from_synthesis)
    }

    async fn persist(
        &self,
        audio: &[u8],
        encoding: AudioEncoding,
    ) -> Result<SynthesisOutcome, TtsServiceError> {
        let file = self
            .file_store
            .write(audio, encoding)
            .await
            .map_err(TtsServiceError::from_storage)?;

        let Some(storage) = &self.storage_repo else {
            return Ok(SynthesisOutcome::Saved(file));
        };

        match storage.upload(&file).await {
            Ok(stored) => {
                if !self.keep_local_after_upload {
                    self.file_store.discard(&file).await;
                }
                Ok(SynthesisOutcome::Uploaded(stored))
            }
            Err(e) => {
                tracing::error!(error = %e, file_name = %file.file_name, "Audio upload failed");
                self.file_store.discard(&file).await;
                Err(TtsServiceError::from_storage(e))
            }
        }
    }
}
