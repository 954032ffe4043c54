use serde::Serialize;
use tokio::sync::oneshot;

use super::error::SessionError;
use super::stats::SessionStats;
use crate::languages::LanguageSelection;
use crate::speech::RecognitionEvent;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Listening,
    Stopping,
}

/// Everything the session task reacts to, in arrival order
#[derive(Debug)]
pub(crate) enum SessionEvent {
    Start {
        languages: LanguageSelection,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    Recognition {
        lifecycle: u64,
        event: RecognitionEvent,
    },
    SilenceElapsed {
        generation: u64,
    },
    Stats {
        reply: oneshot::Sender<SessionStats>,
    },
    Shutdown,
}

/// Live view updates published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ViewUpdate {
    /// Start requested, waiting on permission and the engine
    Preparing,
    State(SessionState),
    /// Committed text plus the current interim guess
    Transcript(String),
    Translating,
    Translated(String),
    TranslationFailed(String),
}
