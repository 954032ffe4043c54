pub mod config;
pub mod http;
pub mod languages;
pub mod session;
pub mod speech;
pub mod translate;

pub use config::Config;
pub use http::{create_router, AppState};
pub use languages::{tts_locale_for, Language, LanguageSelection, LANGUAGES};
pub use session::{
    Capabilities, CaptureConfig, CaptureSession, LateResultPolicy, SessionError, SessionHandle,
    SessionState, SessionStats, ViewUpdate,
};
pub use speech::{
    Fragment, MicrophonePermission, RecognitionConfig, RecognitionEvent, RecognitionSink,
    SpeechOutput, SpeechRecognizer, SpeechRequest, Voice,
};
pub use translate::{GoogleTranslator, RelayClient, TranslateError, Translator};
