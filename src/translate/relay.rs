use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::messages::{TranslateReply, TranslateRequest};
use super::translator::{TranslateError, Translator};

/// Client for this service's `POST /api/translate` endpoint
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    /// `timeout` bounds each request, so a stalled relay surfaces as a
    /// request failure instead of hanging the commit.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslateError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/api/translate", self.base_url)
    }
}

#[async_trait::async_trait]
impl Translator for RelayClient {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let request = TranslateRequest {
            text: Some(text.to_string()),
            target: Some(target.to_string()),
        };

        debug!("POST {} (target={})", self.url(), target);

        let response = self.client.post(self.url()).json(&request).send().await?;
        let status = response.status();
        let reply: TranslateReply = response.json().await?;

        if let Some(error) = reply.error {
            warn!("Relay rejected translation ({}): {}", status, error);
            return Err(TranslateError::Rejected(error));
        }
        if !status.is_success() {
            return Err(TranslateError::Rejected(format!("relay returned {}", status)));
        }

        Ok(reply.translated_text.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "relay"
    }
}
