pub mod google;

pub use google::{GoogleTokenProvider, ServiceAccountKey, CLOUD_PLATFORM_SCOPE, DRIVE_FILE_SCOPE};
