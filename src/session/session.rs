use super::config::CaptureConfig;
use super::error::SessionError;
use super::events::{SessionEvent, SessionState, ViewUpdate};
use super::pipeline::{self, CommitContext};
use super::stats::SessionStats;
use super::transcript::TranscriptBuffer;
use crate::languages::LanguageSelection;
use crate::speech::{
    MicrophonePermission, RecognitionConfig, RecognitionError, RecognitionEvent, RecognitionSink,
    SpeechOutput, SpeechRecognizer,
};
use crate::translate::Translator;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const VIEW_CHANNEL_CAPACITY: usize = 64;

/// External capabilities a capture session drives
pub struct Capabilities {
    /// `None` when the environment has no recognition engine
    pub recognizer: Option<Box<dyn SpeechRecognizer>>,
    pub output: Arc<dyn SpeechOutput>,
    pub translator: Arc<dyn Translator>,
    pub permission: Arc<dyn MicrophonePermission>,
}

/// Why a listening lifecycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeardownReason {
    Manual,
    Silence,
    RecognitionFailure,
    Shutdown,
}

struct SilenceTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// One listening session: continuous recognition with silence-triggered
/// commits, auto-restart on engine end events, and teardown.
///
/// The session runs as a single task; every input (commands, recognition
/// events, timer expiry) arrives on one channel and is handled in order.
/// The task ends when every [`SessionHandle`] is dropped or on shutdown.
/// Handlers check the state first, so late callbacks from a previous
/// lifecycle are ignored.
pub struct CaptureSession {
    id: String,
    config: CaptureConfig,
    state: SessionState,

    recognizer: Option<Box<dyn SpeechRecognizer>>,
    output: Arc<dyn SpeechOutput>,
    translator: Arc<dyn Translator>,
    permission: Arc<dyn MicrophonePermission>,

    /// Fixed at start, for the whole lifecycle
    languages: Option<LanguageSelection>,
    recognition: Option<RecognitionConfig>,
    transcript: TranscriptBuffer,

    silence_timer: Option<SilenceTimer>,
    timer_generation: u64,

    /// Incremented on every start; tags recognition sinks
    lifecycle: u64,
    stop_epoch: Arc<AtomicU64>,

    started_at: Option<chrono::DateTime<Utc>>,
    commits: usize,
    restarts: usize,

    /// Weak so the task ends once every handle is dropped
    events: mpsc::WeakUnboundedSender<SessionEvent>,
    view: broadcast::Sender<ViewUpdate>,
}

/// Cheap handle for driving a running [`CaptureSession`]
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    events: mpsc::UnboundedSender<SessionEvent>,
    view: broadcast::Sender<ViewUpdate>,
}

impl CaptureSession {
    /// Spawn a session task and return its handle
    pub fn spawn(config: CaptureConfig, capabilities: Capabilities) -> SessionHandle {
        let (events, rx) = mpsc::unbounded_channel();
        let (view, _) = broadcast::channel(VIEW_CHANNEL_CAPACITY);
        let id = format!("session-{}", uuid::Uuid::new_v4());

        info!(
            "Creating capture session {} (recognizer: {}, translator: {})",
            id,
            capabilities.recognizer.as_ref().map(|r| r.name()).unwrap_or("none"),
            capabilities.translator.name()
        );

        let session = Self {
            id: id.clone(),
            config,
            state: SessionState::Idle,
            recognizer: capabilities.recognizer,
            output: capabilities.output,
            translator: capabilities.translator,
            permission: capabilities.permission,
            languages: None,
            recognition: None,
            transcript: TranscriptBuffer::new(),
            silence_timer: None,
            timer_generation: 0,
            lifecycle: 0,
            stop_epoch: Arc::new(AtomicU64::new(0)),
            started_at: None,
            commits: 0,
            restarts: 0,
            events: events.downgrade(),
            view: view.clone(),
        };

        tokio::spawn(session.run(rx));

        SessionHandle { id, events, view }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<SessionEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                SessionEvent::Start { languages, reply } => {
                    let result = self.start(languages).await;
                    let _ = reply.send(result);
                }
                SessionEvent::Stop { reply } => {
                    self.stop();
                    let _ = reply.send(());
                }
                SessionEvent::Recognition { lifecycle, event } => {
                    self.on_recognition(lifecycle, event);
                }
                SessionEvent::SilenceElapsed { generation } => {
                    self.on_silence(generation);
                }
                SessionEvent::Stats { reply } => {
                    let _ = reply.send(self.stats());
                }
                SessionEvent::Shutdown => break,
            }
        }

        if self.state != SessionState::Idle {
            self.teardown(TeardownReason::Shutdown);
        }

        debug!("Capture session {} task finished", self.id);
    }

    async fn start(&mut self, languages: LanguageSelection) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            warn!("Start requested while {:?}", self.state);
            return Err(SessionError::AlreadyActive);
        }

        info!(
            "Starting capture session {} ({} -> {})",
            self.id, languages.source_locale, languages.target
        );
        self.publish(ViewUpdate::Preparing);
        self.transcript.clear();

        if !self.permission.request().await {
            warn!("Microphone permission denied");
            return Err(SessionError::PermissionDenied);
        }

        let Some(recognizer) = self.recognizer.as_mut() else {
            warn!("No speech recognition capability available");
            return Err(SessionError::UnsupportedCapability);
        };

        self.lifecycle += 1;
        let config = RecognitionConfig::for_locale(&languages.source_locale);
        let sink = RecognitionSink::new(self.lifecycle, self.events.clone());
        recognizer.start(&config, sink)?;

        self.languages = Some(languages);
        self.recognition = Some(config);
        self.started_at = Some(Utc::now());
        self.set_state(SessionState::Listening);
        self.arm_silence_timer();

        info!("Capture session {} listening", self.id);
        Ok(())
    }

    /// Manual stop: commit whatever is final, then tear down
    fn stop(&mut self) {
        self.stop_epoch.fetch_add(1, Ordering::SeqCst);

        if self.state == SessionState::Listening {
            self.commit();
        }
        self.teardown(TeardownReason::Manual);
    }

    fn on_recognition(&mut self, lifecycle: u64, event: RecognitionEvent) {
        if self.state != SessionState::Listening || lifecycle != self.lifecycle {
            debug!("Ignoring stale recognition event {:?}", event);
            return;
        }

        match event {
            RecognitionEvent::Result(fragments) => {
                self.arm_silence_timer();
                self.transcript.apply(&fragments);
                self.publish(ViewUpdate::Transcript(self.transcript.view()));
            }
            RecognitionEvent::End => self.restart(),
            RecognitionEvent::Error(cause) => {
                warn!("Recognition error: {}", cause);
                self.teardown(TeardownReason::RecognitionFailure);
            }
        }
    }

    /// Restart in place after the engine ended on its own
    fn restart(&mut self) {
        let Some(config) = self.recognition.clone() else {
            self.teardown(TeardownReason::RecognitionFailure);
            return;
        };

        let sink = RecognitionSink::new(self.lifecycle, self.events.clone());
        let result = match self.recognizer.as_mut() {
            Some(recognizer) => recognizer.start(&config, sink),
            None => Err(RecognitionError::Start("no recognizer".to_string())),
        };

        match result {
            Ok(()) => {
                self.restarts += 1;
                info!("Recognition auto-restarted ({})", config.locale);
                self.arm_silence_timer();
            }
            Err(e) => {
                warn!("Could not restart recognition: {}", e);
                self.teardown(TeardownReason::RecognitionFailure);
            }
        }
    }

    fn on_silence(&mut self, generation: u64) {
        let current = self.silence_timer.as_ref().map(|t| t.generation);
        if self.state != SessionState::Listening || current != Some(generation) {
            debug!("Ignoring stale silence timer {}", generation);
            return;
        }
        self.silence_timer = None;

        debug!("Silence timeout after {:?}", self.config.silence_timeout);
        self.commit();
        self.teardown(TeardownReason::Silence);
    }

    /// Snapshot the finalized transcript and hand it to the translate pipeline
    fn commit(&mut self) {
        let Some(text) = self.transcript.take_commit() else {
            return;
        };
        let Some(languages) = self.languages.as_ref() else {
            return;
        };

        self.commits += 1;
        info!(
            "Committing utterance #{} ({} chars) for translation to {}",
            self.commits,
            text.len(),
            languages.target
        );

        let ctx = CommitContext {
            translator: Arc::clone(&self.translator),
            output: Arc::clone(&self.output),
            view: self.view.clone(),
            fallback_locale: self.config.fallback_locale.clone(),
            policy: self.config.late_result_policy,
            stop_epoch: Arc::clone(&self.stop_epoch),
            issued_epoch: self.stop_epoch.load(Ordering::SeqCst),
        };
        tokio::spawn(pipeline::translate_and_speak(ctx, text, languages.target.clone()));
    }

    fn teardown(&mut self, reason: TeardownReason) {
        let was_listening = self.state == SessionState::Listening;
        if was_listening {
            self.set_state(SessionState::Stopping);
        }

        self.cancel_silence_timer();
        if was_listening {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
        }
        self.output.cancel_all();
        self.transcript.clear();

        if self.state != SessionState::Idle {
            self.set_state(SessionState::Idle);
        }
        info!("Capture session {} stopped ({:?})", self.id, reason);
    }

    fn arm_silence_timer(&mut self) {
        self.cancel_silence_timer();
        self.timer_generation += 1;

        let generation = self.timer_generation;
        let timeout = self.config.silence_timeout;
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some(events) = events.upgrade() {
                let _ = events.send(SessionEvent::SilenceElapsed { generation });
            }
        });

        self.silence_timer = Some(SilenceTimer { generation, handle });
    }

    fn cancel_silence_timer(&mut self) {
        if let Some(timer) = self.silence_timer.take() {
            timer.handle.abort();
        }
    }

    fn set_state(&mut self, state: SessionState) {
        self.state = state;
        self.publish(ViewUpdate::State(state));
    }

    fn publish(&self, update: ViewUpdate) {
        // No subscribers is fine
        let _ = self.view.send(update);
    }

    fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.id.clone(),
            state: self.state,
            started_at: self.started_at,
            commits: self.commits,
            restarts: self.restarts,
            transcript: self.transcript.committed().to_string(),
            interim: self.transcript.interim().to_string(),
            silence_timer_pending: self.silence_timer.is_some(),
        }
    }
}

impl SessionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Subscribe to live view updates
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.view.subscribe()
    }

    /// Begin listening with a fixed language pair
    pub async fn start(&self, languages: LanguageSelection) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Start { languages, reply })?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Manual stop; commits any finalized text first
    pub async fn stop(&self) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Stop { reply })?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn stats(&self) -> Result<SessionStats, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Stats { reply })?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Tear down (without committing) and end the session task
    pub fn shutdown(&self) {
        let _ = self.events.send(SessionEvent::Shutdown);
    }

    fn send(&self, event: SessionEvent) -> Result<(), SessionError> {
        self.events.send(event).map_err(|_| SessionError::Closed)
    }
}
