pub mod audio;
pub mod dto;
pub mod error;
pub mod language;
pub mod service;
pub mod validation;
pub mod voice;

pub use audio::{AudioEncoding, AudioSettings};
pub use dto::{
    AudioReference, PreviewRequest, PreviewResponse, SpeechInput, SynthesisRequest,
    SynthesisResponse, SynthesizeRequest, VoicesQuery, VoicesResponse, DEFAULT_PREVIEW_TEXT,
};
pub use error::TtsServiceError;
pub use language::{language_code_from_voice, resolve_language_code};
pub use service::{SynthesisOutcome, TtsService, TtsServiceApi};
pub use validation::{validate_preview_body, validate_synthesis_body, ValidationError};
pub use voice::VoiceDescriptor;
