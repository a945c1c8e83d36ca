use super::error::ProviderError;
use crate::domain::tts::{SynthesisRequest, VoiceDescriptor};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech provider (Google Cloud TTS today).
///
/// Implementations are responsible for:
/// - Translating the normalized request into the provider's call shape
/// - Deriving a language code from the voice when none was supplied
/// - Returning raw audio bytes (no retries)
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a fully-defaulted request into audio bytes in the requested encoding
    ///
    /// # Errors
    /// Returns the provider's error message verbatim if synthesis fails
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError>;

    /// List voices from the provider catalog, optionally narrowed to one language
    async fn list_voices(
        &self,
        language_code: Option<&str>,
    ) -> Result<Vec<VoiceDescriptor>, ProviderError>;
}
