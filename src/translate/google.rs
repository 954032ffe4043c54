use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::translator::{TranslateError, Translator};

/// Upstream translator backed by Google's public `translate_a/single` endpoint
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslateError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body is `[[["<translated>", "<source>", ...], ...], ...]`.
pub fn parse_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::InvalidResponse("missing segment list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    Ok(text)
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        debug!("Requesting upstream translation to {} ({} chars)", target, text.len());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream translation returned {}", status);
            return Err(TranslateError::Rejected(format!("upstream returned {}", status)));
        }

        let body: Value = response.json().await?;
        parse_segments(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}
