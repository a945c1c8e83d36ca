use super::audio_file_store::TransientAudioFile;
use super::error::ProviderError;
use async_trait::async_trait;

/// Reference to audio stored in remote storage
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAudio {
    pub file_id: String,
    pub web_view_link: Option<String>,
    pub web_content_link: Option<String>,
}

/// Durable remote storage for generated audio
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Upload a transient audio file; the local file is left in place
    async fn upload(&self, file: &TransientAudioFile) -> Result<StoredAudio, ProviderError>;
}
