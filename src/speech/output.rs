use serde::Serialize;

/// A synthesis voice offered by the speech output engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub name: String,
    pub locale: String,
    /// Engine's own default voice
    pub default: bool,
}

/// One utterance queued for playback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub locale: String,
    /// Voice name picked by [`select_voice`], if any matched
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locale: locale.into(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// Audible playback capability
pub trait SpeechOutput: Send + Sync {
    /// Queue an utterance for playback
    fn speak(&self, request: SpeechRequest);

    /// Drop everything queued or playing
    fn cancel_all(&self);

    /// Voices available for [`select_voice`]; empty if not yet loaded
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }
}

/// Best-effort voice choice: exact locale, then language prefix, then the
/// engine default.
pub fn select_voice<'a>(voices: &'a [Voice], locale: &str) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|v| v.locale.eq_ignore_ascii_case(locale))
        .or_else(|| {
            let prefix = language_prefix(locale);
            if prefix.is_empty() {
                return None;
            }
            voices
                .iter()
                .find(|v| v.locale.to_ascii_lowercase().starts_with(&prefix))
        })
        .or_else(|| voices.iter().find(|v| v.default))
}

fn language_prefix(locale: &str) -> String {
    locale.chars().take(2).collect::<String>().to_ascii_lowercase()
}
