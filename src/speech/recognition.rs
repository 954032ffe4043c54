use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::session::SessionEvent;

/// Recognition settings applied on every (re)start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub max_alternatives: u8,
}

impl RecognitionConfig {
    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

/// One incremental recognition result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub transcript: String,
    pub is_final: bool,
}

impl Fragment {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: false,
        }
    }

    pub fn finalized(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: true,
        }
    }
}

/// Events a recognition engine reports back to its session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Fragments changed since the previous result event
    Result(Vec<Fragment>),
    /// The engine stopped on its own (e.g. platform duration limit)
    End,
    Error(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("Failed to start recognition: {0}")]
    Start(String),
}

/// Handle a recognizer uses to deliver events to the session that started it.
///
/// Events are tagged with the session lifecycle, so a sink held by an engine
/// from an earlier start cannot affect a later one. The sink does not keep
/// the session alive.
#[derive(Debug, Clone)]
pub struct RecognitionSink {
    lifecycle: u64,
    tx: mpsc::WeakUnboundedSender<SessionEvent>,
}

impl RecognitionSink {
    pub(crate) fn new(lifecycle: u64, tx: mpsc::WeakUnboundedSender<SessionEvent>) -> Self {
        Self { lifecycle, tx }
    }

    pub fn emit(&self, event: RecognitionEvent) {
        // Session gone; nothing left to notify
        if let Some(tx) = self.tx.upgrade() {
            let _ = tx.send(SessionEvent::Recognition {
                lifecycle: self.lifecycle,
                event,
            });
        }
    }

    pub fn result(&self, fragments: Vec<Fragment>) {
        self.emit(RecognitionEvent::Result(fragments));
    }

    pub fn end(&self) {
        self.emit(RecognitionEvent::End);
    }

    pub fn error(&self, cause: impl Into<String>) {
        self.emit(RecognitionEvent::Error(cause.into()));
    }
}

/// Continuous speech recognition capability
///
/// Implementations:
/// - Console: stdin lines as fragments (CLI demo)
/// - Browser engines sit behind the same interface on the client side
pub trait SpeechRecognizer: Send {
    /// Begin continuous recognition, reporting through `sink`
    fn start(&mut self, config: &RecognitionConfig, sink: RecognitionSink)
        -> Result<(), RecognitionError>;

    /// Stop listening. The engine may still emit a trailing `End`.
    fn stop(&mut self);

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// One-shot microphone authorization check, run before every start
#[async_trait::async_trait]
pub trait MicrophonePermission: Send + Sync {
    async fn request(&self) -> bool;
}

/// Permission check for environments without an authorization prompt
pub struct AlwaysGranted;

#[async_trait::async_trait]
impl MicrophonePermission for AlwaysGranted {
    async fn request(&self) -> bool {
        true
    }
}
