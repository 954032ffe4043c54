use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::output::{SpeechOutput, SpeechRequest, Voice};
use super::recognition::{
    Fragment, RecognitionConfig, RecognitionError, RecognitionSink, SpeechRecognizer,
};

/// Recognizer that treats each input line as a fragment.
///
/// Lines starting with `~` are interim guesses, anything else is final.
/// End of input is reported as a capability end event. Restarting after
/// that succeeds without reading anything, so the session's silence timer
/// still commits whatever was read before the input closed.
pub struct LineRecognizer<R> {
    lines: Arc<Mutex<Lines<R>>>,
    exhausted: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

pub type StdinRecognizer = LineRecognizer<BufReader<Stdin>>;

impl StdinRecognizer {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Arc::new(Mutex::new(reader.lines())),
            exhausted: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }
}

/// Parse one console line into a fragment
pub fn parse_line(line: &str) -> Option<Fragment> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    match line.strip_prefix('~') {
        Some(interim) => Some(Fragment::interim(interim)),
        None => Some(Fragment::finalized(line)),
    }
}

impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn start(
        &mut self,
        config: &RecognitionConfig,
        sink: RecognitionSink,
    ) -> Result<(), RecognitionError> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if self.exhausted.load(Ordering::SeqCst) {
            debug!("Console input closed, recognition stays quiet");
            return Ok(());
        }

        info!("Console recognition started ({})", config.locale);

        let lines = Arc::clone(&self.lines);
        let exhausted = Arc::clone(&self.exhausted);
        self.task = Some(tokio::spawn(async move {
            let mut lines = lines.lock().await;
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if let Some(fragment) = parse_line(&line) {
                            sink.result(vec![fragment]);
                        }
                    }
                    Ok(None) => {
                        exhausted.store(true, Ordering::SeqCst);
                        sink.end();
                        break;
                    }
                    Err(e) => {
                        exhausted.store(true, Ordering::SeqCst);
                        sink.error(e.to_string());
                        break;
                    }
                }
            }
        }));

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Console recognition stopped");
        }
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Speech output that prints utterances instead of playing them
#[derive(Default)]
pub struct ConsoleSpeechOutput;

impl SpeechOutput for ConsoleSpeechOutput {
    fn speak(&self, request: SpeechRequest) {
        println!("[speak {}] {}", request.locale, request.text);
    }

    fn cancel_all(&self) {
        debug!("Console speech output cancelled");
    }

    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionEvent;
    use crate::speech::recognition::RecognitionEvent;

    #[test]
    fn test_parse_final_and_interim_lines() {
        assert_eq!(parse_line("hello world"), Some(Fragment::finalized("hello world")));
        assert_eq!(parse_line("~hel"), Some(Fragment::interim("hel")));
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("bonjour\r"), Some(Fragment::finalized("bonjour")));
    }

    async fn next_event(
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<SessionEvent>,
    ) -> RecognitionEvent {
        match rx.recv().await {
            Some(SessionEvent::Recognition { event, .. }) => event,
            _ => panic!("expected a recognition event"),
        }
    }

    #[tokio::test]
    async fn test_restart_after_end_of_input_is_quiet() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let config = RecognitionConfig::for_locale("en-US");
        let mut recognizer =
            LineRecognizer::new(BufReader::new(&b"hello world\n~how\nhow are you\n"[..]));

        recognizer
            .start(&config, RecognitionSink::new(1, tx.downgrade()))
            .unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            RecognitionEvent::Result(vec![Fragment::finalized("hello world")])
        );
        assert_eq!(
            next_event(&mut rx).await,
            RecognitionEvent::Result(vec![Fragment::interim("how")])
        );
        assert_eq!(
            next_event(&mut rx).await,
            RecognitionEvent::Result(vec![Fragment::finalized("how are you")])
        );
        assert_eq!(next_event(&mut rx).await, RecognitionEvent::End);

        // Restart once the input is gone: accepted, and nothing more is emitted
        assert!(recognizer
            .start(&config, RecognitionSink::new(2, tx.downgrade()))
            .is_ok());
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        recognizer.stop();
    }
}
