use serde::{Deserialize, Serialize};

/// Read-only voice entry from the provider's catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDescriptor {
    pub name: String,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub ssml_gender: Option<String>,
    #[serde(default)]
    pub natural_sample_rate_hertz: Option<u32>,
}

impl VoiceDescriptor {
    pub fn supports_any(&self, locales: &[String]) -> bool {
        self.language_codes
            .iter()
            .any(|code| locales.iter().any(|locale| locale == code))
    }
}

/// Keep voices that support at least one of `locales`; an empty list keeps everything
pub fn filter_by_locales(voices: Vec<VoiceDescriptor>, locales: &[String]) -> Vec<VoiceDescriptor> {
    if locales.is_empty() {
        return voices;
    }
    voices.into_iter().filter(|v| v.supports_any(locales)).collect()
}
