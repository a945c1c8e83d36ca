use super::audio_file_store::TransientAudioFile;
use super::error::ProviderError;
use super::storage_repository::{StorageRepository, StoredAudio};
use crate::infrastructure::oauth::{GoogleTokenProvider, DRIVE_FILE_SCOPE};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";

const DRIVE_RESPONSE_FIELDS: &str = "id,webViewLink,webContentLink";

#[derive(Debug, Serialize)]
struct DriveFileMetadata<'a> {
    name: &'a str,
    parents: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    web_view_link: Option<String>,
    #[serde(default)]
    web_content_link: Option<String>,
}

/// Google Drive implementation of storage repository
pub struct DriveStorageRepository {
    http_client: reqwest::Client,
    token_provider: Arc<GoogleTokenProvider>,
    upload_url: String,
    folder_id: String,
}

impl DriveStorageRepository {
    pub fn new(
        http_client: reqwest::Client,
        token_provider: Arc<GoogleTokenProvider>,
        upload_url: String,
        folder_id: String,
    ) -> Self {
        Self {
            http_client,
            token_provider,
            upload_url,
            folder_id,
        }
    }
}

/// Build a `multipart/related` body: JSON metadata part followed by the media part
fn multipart_related_body(
    boundary: &str,
    metadata: &str,
    mime_type: &str,
    media: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(media.len() + metadata.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(media);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[async_trait]
impl StorageRepository for DriveStorageRepository {
    async fn upload(&self, file: &TransientAudioFile) -> Result<StoredAudio, ProviderError> {
        let media = tokio::fs::read(&file.path).await?;
        let metadata = serde_json::to_string(&DriveFileMetadata {
            name: file.file_name.as_str(),
            parents: [self.folder_id.as_str()],
        })
        .map_err(|e| ProviderError::Upstream(format!("Failed to encode file metadata: {}", e)))?;

        let boundary = format!("tts-{}", Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, &metadata, file.encoding.mime_type(), &media);

        let token = self.token_provider.access_token(DRIVE_FILE_SCOPE).await?;

        tracing::info!(
            file_name = %file.file_name,
            folder_id = %self.folder_id,
            size_bytes = media.len(),
            "Uploading audio to Google Drive"
        );

        let response = self
            .http_client
            .post(&self.upload_url)
            .query(&[("uploadType", "multipart"), ("fields", DRIVE_RESPONSE_FIELDS)])
            .bearer_auth(token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Upstream(format!("Google Drive upload failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Upstream(format!(
                "Google Drive upload failed: {}",
                error_text
            )));
        }

        let uploaded: DriveFile = response
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(format!("Failed to parse Drive response: {}", e)))?;

        tracing::info!(
            file_id = %uploaded.id,
            web_view_link = ?uploaded.web_view_link,
            "File uploaded to Google Drive"
        );

        Ok(StoredAudio {
            file_id: uploaded.id,
            web_view_link: uploaded.web_view_link,
            web_content_link: uploaded.web_content_link,
        })
    }
}
