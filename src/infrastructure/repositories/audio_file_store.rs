use super::error::ProviderError;
use crate::domain::tts::AudioEncoding;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Audio written to the transient directory for one request
#[derive(Debug, Clone, PartialEq)]
pub struct TransientAudioFile {
    pub path: PathBuf,
    pub file_name: String,
    pub encoding: AudioEncoding,
}

/// Writes generated audio to a transient directory and removes it best-effort
pub struct AudioFileStore {
    dir: PathBuf,
}

impl AudioFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `tts-<unix millis>-<8 hex chars>.<ext>`
    pub fn generate_file_name(encoding: AudioEncoding) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "tts-{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            &suffix[..8],
            encoding.extension()
        )
    }

    /// Write audio under a fresh unique name. A partially written file is removed.
    pub async fn write(
        &self,
        audio: &[u8],
        encoding: AudioEncoding,
    ) -> Result<TransientAudioFile, ProviderError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = Self::generate_file_name(encoding);
        let file = TransientAudioFile {
            path: self.dir.join(&file_name),
            file_name,
            encoding,
        };

        if let Err(e) = tokio::fs::write(&file.path, audio).await {
            tracing::error!(
                error = %e,
                path = %file.path.display(),
                "Failed to write transient audio file"
            );
            self.discard(&file).await;
            return Err(e.into());
        }

        tracing::info!(
            path = %file.path.display(),
            audio_size_bytes = audio.len(),
            "Audio file written"
        );

        Ok(file)
    }

    /// Remove a transient file. Failures are logged, never returned.
    pub async fn discard(&self, file: &TransientAudioFile) {
        match tokio::fs::remove_file(&file.path).await {
            Ok(()) => {
                tracing::debug!(path = %file.path.display(), "Transient audio file removed");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %file.path.display(),
                    "Failed to clean up transient audio file"
                );
            }
        }
    }
}
