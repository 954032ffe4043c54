use chrono::{DateTime, Utc};
use serde::Serialize;

use super::events::SessionState;

/// Snapshot of a capture session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub session_id: String,

    pub state: SessionState,

    /// When the current (or last) listening lifecycle began
    pub started_at: Option<DateTime<Utc>>,

    /// Number of utterances handed off for translation
    pub commits: usize,

    /// Automatic restarts after capability-imposed end events
    pub restarts: usize,

    /// Finalized text not yet committed
    pub transcript: String,

    /// Latest uncommitted interim guess
    pub interim: String,

    pub silence_timer_pending: bool,
}
