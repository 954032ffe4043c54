//! Speech capabilities used by a capture session
//!
//! - Recognition: continuous speech-to-text with interim results
//! - Output: audible playback with cancel-all
//! - Permission: one-shot microphone authorization check
//! - Console: stdin/stdout stand-ins for the CLI demo

pub mod console;
pub mod output;
pub mod recognition;

pub use console::{ConsoleSpeechOutput, LineRecognizer, StdinRecognizer};
pub use output::{select_voice, SpeechOutput, SpeechRequest, Voice};
pub use recognition::{
    AlwaysGranted, Fragment, MicrophonePermission, RecognitionConfig, RecognitionError,
    RecognitionEvent, RecognitionSink, SpeechRecognizer,
};
