use serde::{Deserialize, Serialize};

pub const TRANSLATE_MESSAGE_EVENT: &str = "translate-message";
pub const TRANSLATED_TEXT_EVENT: &str = "translated-text";
pub const TRANSLATION_ERROR_EVENT: &str = "translation-error";

/// Body of `POST /api/translate`. Fields are optional so a missing one
/// becomes a 400 rather than a rejection inside the JSON extractor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either shape `POST /api/translate` can answer with
#[derive(Debug, Default, Deserialize)]
pub struct TranslateReply {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
    pub error: Option<String>,
}

/// Socket frame envelope: `{ "event": name, "data": payload }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketFrame {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl SocketFrame {
    pub fn new<T: Serialize>(event: &str, data: &T) -> serde_json::Result<Self> {
        Ok(Self {
            event: event.to_string(),
            data: serde_json::to_value(data)?,
        })
    }
}

/// Client → server `translate-message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateMessage {
    pub text: String,
    #[serde(rename = "targetLang")]
    pub target_lang: String,
}

/// Server → client `translated-text`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedText {
    pub text: String,
    pub lang: String,
}
