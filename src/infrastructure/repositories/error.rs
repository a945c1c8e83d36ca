/// Failure reported by an external provider or by local audio persistence
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Missing or unusable credentials
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    /// The provider rejected SSML input for the selected voice
    #[error("{0}")]
    SsmlUnsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
