use crate::translate::Translator;
use std::sync::Arc;

/// Shared application state for HTTP and socket handlers
#[derive(Clone)]
pub struct AppState {
    /// The one translator both transports relay to
    pub translator: Arc<dyn Translator>,
}

impl AppState {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }
}
