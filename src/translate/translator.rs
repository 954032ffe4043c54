use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// The service answered with an error message
    #[error("Translate error: {0}")]
    Rejected(String),

    /// The request never produced a usable answer
    #[error("Translation request failed: {0}")]
    Request(String),

    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),
}

impl TranslateError {
    /// Text shown in the live translation view
    pub fn view_message(&self) -> String {
        match self {
            TranslateError::Rejected(msg) => format!("Translate error: {}", msg),
            TranslateError::Request(_) | TranslateError::InvalidResponse(_) => {
                "Translation request failed".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslateError::InvalidResponse(err.to_string())
        } else {
            TranslateError::Request(err.to_string())
        }
    }
}

/// Text translation, attempted exactly once per call
///
/// Implementations:
/// - Google: the public translate endpoint (server side)
/// - Relay: this service's own `POST /api/translate` (client side)
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;

    /// Translator name for logging
    fn name(&self) -> &str;
}
