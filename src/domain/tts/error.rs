use super::validation::ValidationError;
use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("{0}")]
    Configuration(String),
    #[error("Synthesis failed: {0}")]
    Dependency(String),
    #[error("Synthesis failed: {0}")]
    SsmlUnsupportedVoice(String),
    #[error("Saving audio failed: {0}")]
    Storage(String),
    #[error("Failed to fetch available voices: {0}")]
    Catalog(String),
}

impl TtsServiceError {
    /// Classify a failure from the synthesis provider
    pub fn from_synthesis(err: ProviderError) -> Self {
        match err {
            ProviderError::Configuration(msg) => TtsServiceError::Configuration(msg),
            ProviderError::SsmlUnsupported(msg) => TtsServiceError::SsmlUnsupportedVoice(msg),
            ProviderError::Upstream(msg) => TtsServiceError::Dependency(msg),
            ProviderError::Io(e) => TtsServiceError::Dependency(e.to_string()),
        }
    }

    /// Classify a failure while reading the voice catalog
    pub fn from_catalog(err: ProviderError) -> Self {
        match err {
            ProviderError::Configuration(msg) => TtsServiceError::Configuration(msg),
            other => TtsServiceError::Catalog(other.to_string()),
        }
    }

    /// Classify a failure while writing or uploading audio
    pub fn from_storage(err: ProviderError) -> Self {
        match err {
            ProviderError::Configuration(msg) => TtsServiceError::Configuration(msg),
            other => TtsServiceError::Storage(other.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.0)
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Configuration(msg) => AppError::Configuration(msg),
            e @ TtsServiceError::SsmlUnsupportedVoice(_) => {
                AppError::SsmlUnsupportedVoice(e.to_string())
            }
            e @ (TtsServiceError::Dependency(_)
            | TtsServiceError::Storage(_)
            | TtsServiceError::Catalog(_)) => {
                AppError::Upstream(e.to_string())
            }
        }
    }
}
