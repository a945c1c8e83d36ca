/// Derive a BCP-47 language code from a provider voice name.
///
/// Voice names look like `en-US-Standard-A` or `cmn-CN-Wavenet-B`; the
/// language code is the first two dash-delimited segments.
pub fn language_code_from_voice(voice: &str) -> String {
    voice
        .split('-')
        .take(2)
        .collect::<Vec<_>>()
        .join("-")
}

/// Use the explicit language code when supplied, otherwise derive it from the voice
pub fn resolve_language_code(explicit: Option<&str>, voice: &str) -> String {
    match explicit.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => language_code_from_voice(voice),
    }
}
