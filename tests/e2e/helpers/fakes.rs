use async_trait::async_trait;
use parking_lot::Mutex;
use tts_gateway::domain::tts::{SynthesisRequest, VoiceDescriptor};
use tts_gateway::infrastructure::repositories::{
    ProviderError, StorageRepository, StoredAudio, TransientAudioFile, TtsRepository,
};

/// How the fake speech provider answers
#[derive(Debug, Clone)]
pub enum FakeTtsBehavior {
    Audio(Vec<u8>),
    Upstream(String),
    SsmlUnsupported(String),
    Unconfigured(String),
}

/// In-process speech provider that records every call
pub struct FakeTts {
    behavior: FakeTtsBehavior,
    voices: Vec<VoiceDescriptor>,
    calls: Mutex<Vec<SynthesisRequest>>,
    voice_queries: Mutex<Vec<Option<String>>>,
}

impl FakeTts {
    pub fn new(behavior: FakeTtsBehavior) -> Self {
        Self {
            behavior,
            voices: default_voices(),
            calls: Mutex::new(Vec::new()),
            voice_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(audio: &[u8]) -> Self {
        Self::new(FakeTtsBehavior::Audio(audio.to_vec()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(FakeTtsBehavior::Upstream(message.to_string()))
    }

    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn voice_queries(&self) -> Vec<Option<String>> {
        self.voice_queries.lock().clone()
    }
}

#[async_trait]
impl TtsRepository for FakeTts {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        self.calls.lock().push(request.clone());
        match &self.behavior {
            FakeTtsBehavior::Audio(audio) => Ok(audio.clone()),
            FakeTtsBehavior::Upstream(m) => Err(ProviderError::Upstream(m.clone())),
            FakeTtsBehavior::SsmlUnsupported(m) => Err(ProviderError::SsmlUnsupported(m.clone())),
            FakeTtsBehavior::Unconfigured(m) => Err(ProviderError::Configuration(m.clone())),
        }
    }

    async fn list_voices(
        &self,
        language_code: Option<&str>,
    ) -> Result<Vec<VoiceDescriptor>, ProviderError> {
        self.voice_queries
            .lock()
            .push(language_code.map(str::to_string));
        if let FakeTtsBehavior::Upstream(m) = &self.behavior {
            return Err(ProviderError::Upstream(m.clone()));
        }
        Ok(self.voices.clone())
    }
}

fn voice(name: &str, language: &str, gender: &str) -> VoiceDescriptor {
    VoiceDescriptor {
        name: name.to_string(),
        language_codes: vec![language.to_string()],
        ssml_gender: Some(gender.to_string()),
        natural_sample_rate_hertz: Some(24000),
    }
}

fn default_voices() -> Vec<VoiceDescriptor> {
    vec![
        voice("en-US-Standard-A", "en-US", "MALE"),
        voice("en-US-Wavenet-F", "en-US", "FEMALE"),
        voice("de-DE-Standard-B", "de-DE", "MALE"),
        voice("ja-JP-Neural2-B", "ja-JP", "FEMALE"),
    ]
}

/// Remote storage double; records what it saw on disk at upload time
pub struct FakeStorage {
    fail_with: Option<String>,
    uploads: Mutex<Vec<UploadRecord>>,
}

#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FakeStorage {
    pub fn succeeding() -> Self {
        Self {
            fail_with: None,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<UploadRecord> {
        self.uploads.lock().clone()
    }
}

#[async_trait]
impl StorageRepository for FakeStorage {
    async fn upload(&self, file: &TransientAudioFile) -> Result<StoredAudio, ProviderError> {
        let bytes = tokio::fs::read(&file.path).await?;
        self.uploads.lock().push(UploadRecord {
            file_name: file.file_name.clone(),
            bytes,
        });

        if let Some(message) = &self.fail_with {
            return Err(ProviderError::Upstream(message.clone()));
        }

        Ok(StoredAudio {
            file_id: "drive-file-123".to_string(),
            web_view_link: Some("https://drive.google.com/file/d/drive-file-123/view".to_string()),
            web_content_link: Some(
                "https://drive.google.com/uc?id=drive-file-123&export=download".to_string(),
            ),
        })
    }
}
