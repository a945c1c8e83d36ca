use serde_json::{json, Value};

pub const VOICE: &str = "en-US-Standard-A";

pub fn synthesize_body(text: &str) -> Value {
    json!({
        "text": text,
        "voice": VOICE,
        "languageCode": "en-US"
    })
}

pub fn inline_body(text: &str) -> Value {
    json!({
        "text": text,
        "voice": VOICE,
        "languageCode": "en-US",
        "playWithoutSaving": true
    })
}

pub fn ssml_body(ssml: &str) -> Value {
    json!({
        "text": ssml,
        "voice": VOICE,
        "ssml": true,
        "playWithoutSaving": true
    })
}
