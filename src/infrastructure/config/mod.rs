use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::infrastructure::repositories::{
    drive_storage_repository::DEFAULT_DRIVE_UPLOAD_URL,
    google_tts_repository::DEFAULT_TTS_API_BASE_URL,
};

pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;
pub const DEFAULT_PREVIEW_MAX_TEXT_LENGTH: usize = 500;
pub const DEFAULT_VOICE_LOCALES: &str = "en-US,en-GB,en-AU";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Google Cloud TTS
    pub google_credentials_path: Option<PathBuf>,
    pub tts_api_base_url: String,
    // Google Drive
    pub drive_credentials_path: Option<PathBuf>,
    pub drive_folder_id: Option<String>,
    pub drive_upload_url: String,
    // Request limits
    pub max_text_length: usize,
    pub preview_max_text_length: usize,
    pub voice_locales: Vec<String>,
    // Transient audio files
    pub audio_output_dir: PathBuf,
    pub keep_local_after_upload: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Comma-separated locale list; blanks are dropped
pub fn parse_locales(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let google_credentials_path = non_empty("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from);

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            drive_credentials_path: non_empty("GOOGLE_DRIVE_CREDENTIALS")
                .map(PathBuf::from)
                .or_else(|| google_credentials_path.clone()),
            google_credentials_path,
            tts_api_base_url: non_empty("TTS_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TTS_API_BASE_URL.to_string()),
            drive_folder_id: non_empty("GOOGLE_DRIVE_FOLDER_ID"),
            drive_upload_url: non_empty("DRIVE_UPLOAD_URL")
                .unwrap_or_else(|| DEFAULT_DRIVE_UPLOAD_URL.to_string()),
            max_text_length: env::var("TTS_MAX_TEXT_LENGTH")
                .unwrap_or_else(|_| DEFAULT_MAX_TEXT_LENGTH.to_string())
                .parse()
                .context("TTS_MAX_TEXT_LENGTH must be a positive integer")?,
            preview_max_text_length: env::var("PREVIEW_MAX_TEXT_LENGTH")
                .unwrap_or_else(|_| DEFAULT_PREVIEW_MAX_TEXT_LENGTH.to_string())
                .parse()
                .context("PREVIEW_MAX_TEXT_LENGTH must be a positive integer")?,
            voice_locales: parse_locales(
                &env::var("VOICE_LOCALES").unwrap_or_else(|_| DEFAULT_VOICE_LOCALES.to_string()),
            ),
            audio_output_dir: non_empty("AUDIO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            keep_local_after_upload: env::var("KEEP_LOCAL_AFTER_UPLOAD")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
