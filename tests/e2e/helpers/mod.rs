use std::path::PathBuf;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use tts_gateway::controllers::{
    health::HealthStatus,
    tts::{TextLimits, TtsController},
};
use tts_gateway::domain::tts::TtsService;
use tts_gateway::infrastructure::http::create_router;
use tts_gateway::infrastructure::repositories::{AudioFileStore, StorageRepository};

pub mod api_client;
pub mod fakes;
pub mod fixtures;

use api_client::TestClient;
use fakes::{FakeStorage, FakeTts};

pub const TEST_MAX_TEXT_LENGTH: usize = 5000;
pub const TEST_PREVIEW_MAX_TEXT_LENGTH: usize = 200;

/// Knobs for a non-default test server
pub struct TestOptions {
    pub tts: FakeTts,
    pub storage: Option<FakeStorage>,
    pub keep_local_after_upload: bool,
    pub synthesis_configured: bool,
    pub voice_locales: Vec<String>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            tts: FakeTts::returning(b"ID3-fake-mp3-bytes"),
            storage: None,
            keep_local_after_upload: false,
            synthesis_configured: true,
            voice_locales: Vec::new(),
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub tts: Arc<FakeTts>,
    pub storage: Option<Arc<FakeStorage>>,
    pub audio_dir: PathBuf,
}

impl TestContext {
    /// Start the real router on an ephemeral port, backed by fake providers
    pub async fn start(options: TestOptions) -> Self {
        let audio_dir = std::env::temp_dir().join(format!("tts-gateway-e2e-{}", uuid::Uuid::new_v4()));

        let tts = Arc::new(options.tts);
        let storage = options.storage.map(Arc::new);

        let tts_service = Arc::new(TtsService::new(
            tts.clone(),
            storage
                .clone()
                .map(|s| s as Arc<dyn StorageRepository>),
            Arc::new(AudioFileStore::new(audio_dir.clone())),
            options.keep_local_after_upload,
            options.voice_locales,
        ));
        let tts_controller = Arc::new(TtsController::new(
            tts_service,
            TextLimits {
                max_text_length: TEST_MAX_TEXT_LENGTH,
                preview_max_text_length: TEST_PREVIEW_MAX_TEXT_LENGTH,
            },
        ));
        let health_status = Arc::new(HealthStatus {
            synthesis_configured: options.synthesis_configured,
            drive_configured: storage.is_some(),
        });

        let app = create_router(tts_controller, health_status);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: TestClient::new(&base_url),
            tts,
            storage,
            audio_dir,
        }
    }

    /// Number of files currently in the transient audio directory
    pub async fn audio_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if let Ok(mut entries) = tokio::fs::read_dir(&self.audio_dir).await {
            while let Ok(Some(entry)) = entries.next_entry().await {
                files.push(entry.path());
            }
        }
        files
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.audio_dir).await;
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        TestContext::start(TestOptions::default())
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async move {
            self.cleanup().await;
        }
    }
}

// Helper to assert the JSON error envelope
pub fn assert_error_response(response: &serde_json::Value, expected_kind: &str) {
    let kind = response.get("kind").expect("Missing kind field");
    assert_eq!(kind.as_str().unwrap(), expected_kind);
    assert!(
        response.get("error").and_then(|e| e.as_str()).is_some(),
        "Missing error message"
    );
}
