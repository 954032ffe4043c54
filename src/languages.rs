//! Supported languages and the translation-code → speech-locale lookup

use serde::Serialize;

/// One selectable language: the locale used for recognition and the
/// short code used for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub source_locale: &'static str,
    pub target: &'static str,
    pub label: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { source_locale: "en-US", target: "en", label: "English (US)" },
    Language { source_locale: "hi-IN", target: "hi", label: "Hindi" },
    Language { source_locale: "gu-IN", target: "gu", label: "Gujarati" },
    Language { source_locale: "ta-IN", target: "ta", label: "Tamil" },
    Language { source_locale: "fr-FR", target: "fr", label: "French" },
    Language { source_locale: "es-ES", target: "es", label: "Spanish" },
    Language { source_locale: "ar-SA", target: "ar", label: "Arabic" },
    Language { source_locale: "de-DE", target: "de", label: "German" },
    Language { source_locale: "bn-IN", target: "bn", label: "Bengali" },
];

pub const DEFAULT_SOURCE_LOCALE: &str = "en-US";
pub const DEFAULT_TARGET: &str = "hi";

/// Language pair fixed for the lifetime of one capture session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelection {
    /// Recognition locale, e.g. `en-US`
    pub source_locale: String,
    /// Translation target code, e.g. `hi`
    pub target: String,
}

impl LanguageSelection {
    pub fn new(source_locale: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_locale: source_locale.into(),
            target: target.into(),
        }
    }
}

impl Default for LanguageSelection {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LOCALE, DEFAULT_TARGET)
    }
}

/// Resolve a short translation code to a full speech locale.
///
/// Table hit first, then the code itself, then `fallback`.
pub fn tts_locale_for(target: &str, fallback: &str) -> String {
    if let Some(lang) = LANGUAGES.iter().find(|l| l.target == target) {
        return lang.source_locale.to_string();
    }
    if !target.is_empty() {
        return target.to_string();
    }
    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_full_locale() {
        assert_eq!(tts_locale_for("hi", "en-US"), "hi-IN");
        assert_eq!(tts_locale_for("ar", "en-US"), "ar-SA");
        assert_eq!(tts_locale_for("en", "en-GB"), "en-US");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(tts_locale_for("ja", "en-US"), "ja");
    }

    #[test]
    fn test_empty_code_uses_fallback() {
        assert_eq!(tts_locale_for("", "en-US"), "en-US");
    }

    #[test]
    fn test_default_selection() {
        let selection = LanguageSelection::default();
        assert_eq!(selection.source_locale, "en-US");
        assert_eq!(selection.target, "hi");
    }
}
