use crate::speech::Fragment;

pub const LISTENING_PLACEHOLDER: &str = "Listening...";

/// Finalized fragments of the current utterance plus the latest interim guess
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    committed: String,
    interim: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly finalized fragments and replace the interim guess
    pub fn apply(&mut self, fragments: &[Fragment]) {
        let mut interim = String::new();
        for fragment in fragments {
            if fragment.is_final {
                let text = fragment.transcript.trim();
                if !text.is_empty() {
                    self.committed.push_str(text);
                    self.committed.push(' ');
                }
            } else {
                interim.push_str(&fragment.transcript);
            }
        }
        self.interim = interim;
    }

    /// Text for the live transcript view
    pub fn view(&self) -> String {
        let text = format!("{}{}", self.committed, self.interim);
        let text = text.trim();
        if text.is_empty() {
            LISTENING_PLACEHOLDER.to_string()
        } else {
            text.to_string()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.committed.trim().is_empty()
    }

    /// Snapshot the finalized text and clear the buffer.
    ///
    /// Returns `None` (leaving the buffer untouched) when nothing is final.
    pub fn take_commit(&mut self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let text = self.committed.trim().to_string();
        self.clear();
        Some(text)
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.interim.clear();
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interim_is_replaced_not_appended() {
        let mut buffer = TranscriptBuffer::new();
        buffer.apply(&[Fragment::interim("hel")]);
        buffer.apply(&[Fragment::interim("hello")]);
        assert_eq!(buffer.interim(), "hello");
        assert_eq!(buffer.view(), "hello");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_final_fragments_accumulate_with_separator() {
        let mut buffer = TranscriptBuffer::new();
        buffer.apply(&[Fragment::finalized(" hello ")]);
        buffer.apply(&[Fragment::finalized("world"), Fragment::interim("and")]);
        assert_eq!(buffer.committed(), "hello world ");
        assert_eq!(buffer.view(), "hello world and");
    }

    #[test]
    fn test_take_commit_clears_everything() {
        let mut buffer = TranscriptBuffer::new();
        buffer.apply(&[Fragment::finalized("bonjour"), Fragment::interim("à")]);
        assert_eq!(buffer.take_commit().as_deref(), Some("bonjour"));
        assert_eq!(buffer.committed(), "");
        assert_eq!(buffer.interim(), "");
        assert_eq!(buffer.take_commit(), None);
    }

    #[test]
    fn test_empty_view_shows_placeholder() {
        let buffer = TranscriptBuffer::new();
        assert_eq!(buffer.view(), LISTENING_PLACEHOLDER);
    }
}
