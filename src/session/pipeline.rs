//! Commit → translate → speak, run detached from the session once a commit
//! is issued. The translate call is never cancelled; whether its result may
//! still be spoken is decided by [`LateResultPolicy`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

use super::config::LateResultPolicy;
use super::events::ViewUpdate;
use crate::languages::tts_locale_for;
use crate::speech::{select_voice, SpeechOutput, SpeechRequest};
use crate::translate::Translator;

pub(crate) struct CommitContext {
    pub translator: Arc<dyn Translator>,
    pub output: Arc<dyn SpeechOutput>,
    pub view: broadcast::Sender<ViewUpdate>,
    pub fallback_locale: String,
    pub policy: LateResultPolicy,
    /// Bumped on every manual stop
    pub stop_epoch: Arc<AtomicU64>,
    /// `stop_epoch` when this commit was issued
    pub issued_epoch: u64,
}

impl CommitContext {
    fn is_late(&self) -> bool {
        self.stop_epoch.load(Ordering::SeqCst) != self.issued_epoch
    }

    fn publish(&self, update: ViewUpdate) {
        let _ = self.view.send(update);
    }
}

pub(crate) async fn translate_and_speak(ctx: CommitContext, text: String, target: String) {
    ctx.publish(ViewUpdate::Translating);

    let result = ctx.translator.translate(&text, &target).await;

    let late = ctx.is_late();
    if late && ctx.policy == LateResultPolicy::Drop {
        info!("Dropping translation result that arrived after stop");
        return;
    }

    match result {
        Ok(translated) => {
            info!("Translated {} chars to {} via {}", text.len(), target, ctx.translator.name());
            ctx.publish(ViewUpdate::Translated(translated.clone()));

            if late && ctx.policy == LateResultPolicy::ViewOnly {
                info!("Not speaking translation that arrived after stop");
                return;
            }
            speak(ctx.output.as_ref(), &translated, &target, &ctx.fallback_locale);
        }
        Err(e) => {
            warn!("Translation failed: {}", e);
            ctx.publish(ViewUpdate::TranslationFailed(e.view_message()));
        }
    }
}

/// Replace whatever is playing with `text` spoken in the target's locale
pub fn speak(output: &dyn SpeechOutput, text: &str, target: &str, fallback_locale: &str) {
    let locale = tts_locale_for(target, fallback_locale);
    let mut request = SpeechRequest::new(text, locale);
    request.voice = select_voice(&output.voices(), &request.locale).map(|v| v.name.clone());

    output.cancel_all();
    output.speak(request);
}
