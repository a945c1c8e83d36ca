//! Gatekeeping checks run on raw JSON bodies before any provider call.
//!
//! Validation does not transform the request; defaults are applied later when
//! the body is converted into a [`SynthesisRequest`](super::dto::SynthesisRequest).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::audio::AudioEncoding;

pub const SPEAKING_RATE_RANGE: (f64, f64) = (0.25, 4.0);
pub const PITCH_RANGE: (f64, f64) = (-20.0, 20.0);
pub const VOLUME_GAIN_DB_RANGE: (f64, f64) = (-96.0, 16.0);

const SSML_ROOT_CLOSE: &str = "</speak>";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

static SSML_ROOT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<speak(\s[^>]*)?>").expect("valid SSML root pattern"));

/// Validate the body of POST /synthesize
pub fn validate_synthesis_body(body: &Value, max_text_length: usize) -> Result<(), ValidationError> {
    let fields = as_object(body)?;

    let text = required_string(fields, "text", "Text")?;
    check_text_length(text, max_text_length)?;
    required_string(fields, "voice", "Voice")?;
    optional_string(fields, "languageCode")?;
    optional_format(fields, "format")?;
    check_numeric_fields(fields, "volumeGainDb")?;
    optional_number(fields, "volumeGain", VOLUME_GAIN_DB_RANGE)?;
    if is_present(fields, "volumeGainDb") && is_present(fields, "volumeGain") {
        return Err(ValidationError::new(
            "Specify either volumeGainDb or volumeGain, not both",
        ));
    }
    optional_bool(fields, "playWithoutSaving")?;

    if optional_bool(fields, "ssml")?.unwrap_or(false) {
        validate_ssml_envelope(text)?;
    }

    Ok(())
}

/// Validate the body of POST /preview
pub fn validate_preview_body(body: &Value, max_text_length: usize) -> Result<(), ValidationError> {
    let fields = as_object(body)?;

    required_string(fields, "voice", "Voice")?;
    optional_string(fields, "languageCode")?;
    if let Some(text) = optional_string(fields, "text")? {
        check_text_length(text, max_text_length)?;
    }

    match fields.get("audioConfig") {
        None | Some(Value::Null) => {}
        Some(Value::Object(config)) => {
            optional_format(config, "audioEncoding")?;
            check_numeric_fields(config, "volumeGainDb")?;
        }
        Some(_) => return Err(ValidationError::new("audioConfig must be an object")),
    }

    Ok(())
}

/// Crude envelope check: the trimmed text must open with a `<speak>` root tag
/// (attributes allowed) and end with `</speak>`. This is not XML validation.
pub fn validate_ssml_envelope(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if !SSML_ROOT_OPEN.is_match(trimmed) || !trimmed.ends_with(SSML_ROOT_CLOSE) {
        return Err(ValidationError::new(
            "Invalid SSML input. SSML text must start with <speak> and end with </speak>.",
        ));
    }
    Ok(())
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError::new("Request body must be a JSON object"))
}

fn required_string<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    label: &str,
) -> Result<&'a str, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(ValidationError::new(format!("{} is required", label))),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ValidationError::new(format!("{} is required", label)))
        }
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::new(format!("{} must be a string", label))),
    }
}

fn optional_string<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ValidationError::new(format!("{} must be a string", key))),
    }
}

fn is_present(fields: &Map<String, Value>, key: &str) -> bool {
    !matches!(fields.get(key), None | Some(Value::Null))
}

fn optional_bool(fields: &Map<String, Value>, key: &str) -> Result<Option<bool>, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ValidationError::new(format!("{} must be a boolean", key))),
    }
}

fn optional_format(fields: &Map<String, Value>, key: &str) -> Result<(), ValidationError> {
    let supported = || {
        ValidationError::new(
            "Invalid audio format. Supported formats are MP3, LINEAR16, and OGG_OPUS.",
        )
    };
    match optional_string(fields, key) {
        Ok(None) => Ok(()),
        Ok(Some(format)) => AudioEncoding::parse(format).map(|_| ()).ok_or_else(supported),
        Err(_) => Err(supported()),
    }
}

fn optional_number(
    fields: &Map<String, Value>,
    key: &str,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => {
            let number = value
                .as_f64()
                .ok_or_else(|| ValidationError::new(format!("{} must be a number", key)))?;
            if number < min || number > max {
                return Err(ValidationError::new(format!(
                    "{} must be between {} and {}",
                    key, min, max
                )));
            }
            Ok(())
        }
    }
}

fn optional_sample_rate(fields: &Map<String, Value>, key: &str) -> Result<(), ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => match value.as_u64() {
            Some(rate) if rate > 0 && rate <= u64::from(u32::MAX) => Ok(()),
            _ => Err(ValidationError::new(format!(
                "{} must be a positive integer",
                key
            ))),
        },
    }
}

/// Shared checks for the numeric audio parameters
fn check_numeric_fields(fields: &Map<String, Value>, gain_key: &str) -> Result<(), ValidationError> {
    optional_sample_rate(fields, "sampleRateHertz")?;
    optional_number(fields, "speakingRate", SPEAKING_RATE_RANGE)?;
    optional_number(fields, "pitch", PITCH_RANGE)?;
    optional_number(fields, gain_key, VOLUME_GAIN_DB_RANGE)
}

fn check_text_length(text: &str, max_text_length: usize) -> Result<(), ValidationError> {
    if text.chars().count() > max_text_length {
        return Err(ValidationError::new(format!(
            "Text exceeds maximum length of {} characters",
            max_text_length
        )));
    }
    Ok(())
}
