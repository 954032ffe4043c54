use thiserror::Error;

use crate::speech::RecognitionError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please allow microphone access to start listening")]
    PermissionDenied,

    #[error("Speech recognition is not supported in this environment")]
    UnsupportedCapability,

    #[error("Session is already listening")]
    AlreadyActive,

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error("Session task has shut down")]
    Closed,
}
