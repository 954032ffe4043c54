use anyhow::{Context, Result};
use serde::Deserialize;

use crate::session::{CaptureConfig, LateResultPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub translation: TranslationConfig,
    pub capture: CaptureSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    /// Directory served at `/` (the browser client), if any
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    /// Upstream translate endpoint (Google `translate_a/single`)
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureSettings {
    pub silence_timeout_ms: u64,
    pub fallback_locale: String,
    pub late_result_policy: LateResultPolicy,
    pub default_source: String,
    pub default_target: String,
}

impl CaptureSettings {
    pub fn to_capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            silence_timeout: std::time::Duration::from_millis(self.silence_timeout_ms),
            fallback_locale: self.fallback_locale.clone(),
            late_result_policy: self.late_result_policy,
        }
    }
}

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

impl Config {
    /// Load configuration from defaults, an optional file and `LIVE_TRANSLATE__*` env vars
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "live-translate")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 5000_i64)?
            .set_default("translation.endpoint", DEFAULT_TRANSLATE_ENDPOINT)?
            .set_default("translation.timeout_secs", 10_i64)?
            .set_default("capture.silence_timeout_ms", 2000_i64)?
            .set_default("capture.fallback_locale", "en-US")?
            .set_default("capture.late_result_policy", "view_only")?
            .set_default("capture.default_source", "en-US")?
            .set_default("capture.default_target", "hi")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("LIVE_TRANSLATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}
