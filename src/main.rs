use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_gateway::controllers::{
    health::HealthStatus,
    tts::{TextLimits, TtsController},
};
use tts_gateway::domain::tts::TtsService;
use tts_gateway::infrastructure::config::{Config, LogFormat};
use tts_gateway::infrastructure::http::{create_router, start_http_server};
use tts_gateway::infrastructure::oauth::GoogleTokenProvider;
use tts_gateway::infrastructure::repositories::{
    AudioFileStore, DriveStorageRepository, GoogleTtsRepository, StorageRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TTS gateway on {}:{} ({:?})",
        config.host,
        config.port,
        config.environment
    );

    if config.google_credentials_path.is_none() {
        tracing::warn!(
            "GOOGLE_APPLICATION_CREDENTIALS is not set. Synthesis requests will fail until it is configured."
        );
    }

    let http_client = reqwest::Client::new();

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Credentials
    let tts_tokens = Arc::new(GoogleTokenProvider::new(
        config.google_credentials_path.clone(),
        "GOOGLE_APPLICATION_CREDENTIALS",
        http_client.clone(),
    ));
    let drive_tokens = Arc::new(GoogleTokenProvider::new(
        config.drive_credentials_path.clone(),
        "GOOGLE_DRIVE_CREDENTIALS",
        http_client.clone(),
    ));

    // 2. Repositories
    tracing::info!("Instantiating repositories...");
    let tts_repo = Arc::new(GoogleTtsRepository::new(
        http_client.clone(),
        tts_tokens.clone(),
        config.tts_api_base_url.clone(),
    ));
    let storage_repo: Option<Arc<dyn StorageRepository>> = match &config.drive_folder_id {
        Some(folder_id) => {
            tracing::info!(folder_id = %folder_id, "Generated audio will be uploaded to Google Drive");
            Some(Arc::new(DriveStorageRepository::new(
                http_client.clone(),
                drive_tokens,
                config.drive_upload_url.clone(),
                folder_id.clone(),
            )))
        }
        None => {
            tracing::info!(
                dir = %config.audio_output_dir.display(),
                "GOOGLE_DRIVE_FOLDER_ID not set; generated audio is kept as local files"
            );
            None
        }
    };
    let file_store = Arc::new(AudioFileStore::new(config.audio_output_dir.clone()));

    // 3. Services
    tracing::info!("Instantiating services...");
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        storage_repo,
        file_store,
        config.keep_local_after_upload,
        config.voice_locales.clone(),
    ));

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let tts_controller = Arc::new(TtsController::new(
        tts_service,
        TextLimits {
            max_text_length: config.max_text_length,
            preview_max_text_length: config.preview_max_text_length,
        },
    ));
    let health_status = Arc::new(HealthStatus {
        synthesis_configured: tts_tokens.is_configured(),
        drive_configured: config.drive_folder_id.is_some(),
    });

    let app = create_router(tts_controller, health_status);

    start_http_server(Arc::new(config), app).await
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "tts_gateway=debug,tower_http=debug"
    } else {
        "tts_gateway=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
