pub mod audio_file_store;
pub mod drive_storage_repository;
pub mod error;
pub mod google_tts_repository;
pub mod storage_repository;
pub mod tts_repository;

pub use audio_file_store::{AudioFileStore, TransientAudioFile};
pub use drive_storage_repository::DriveStorageRepository;
pub use error::ProviderError;
pub use google_tts_repository::GoogleTtsRepository;
pub use storage_repository::{StorageRepository, StoredAudio};
pub use tts_repository::TtsRepository;
