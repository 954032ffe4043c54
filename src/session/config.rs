use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a commit's late translation result may still do once the user has
/// stopped the session after the commit was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateResultPolicy {
    /// Update the view and speak the result
    Apply,
    /// Update the view, never speak
    #[default]
    ViewOnly,
    /// Ignore the result entirely
    Drop,
}

/// Configuration for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Quiet interval after the last recognition update before committing
    /// Default: 2 seconds
    pub silence_timeout: Duration,

    /// Speech locale used when a target code resolves to nothing
    pub fallback_locale: String,

    pub late_result_policy: LateResultPolicy,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            silence_timeout: Duration::from_millis(2000),
            fallback_locale: "en-US".to_string(),
            late_result_policy: LateResultPolicy::default(),
        }
    }
}
