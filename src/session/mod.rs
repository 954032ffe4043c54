//! Capture session management
//!
//! This module provides the `CaptureSession` state machine that manages:
//! - Continuous recognition with auto-restart on engine end events
//! - Final vs. interim transcript accumulation
//! - Silence-triggered commits and manual stop
//! - The detached translate-and-speak pipeline per commit

mod config;
mod error;
mod events;
mod pipeline;
mod session;
mod stats;
mod transcript;

pub use config::{CaptureConfig, LateResultPolicy};
pub use error::SessionError;
pub(crate) use events::SessionEvent;
pub use events::{SessionState, ViewUpdate};
pub use pipeline::speak;
pub use session::{Capabilities, CaptureSession, SessionHandle};
pub use stats::SessionStats;
pub use transcript::{TranscriptBuffer, LISTENING_PLACEHOLDER};
