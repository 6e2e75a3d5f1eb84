//! Annotation Engine
//!
//! Recomputes every span from scratch on each pass and owns the session
//! state the spelling actions need: the forget list and the redundancy
//! search cursor.

use std::sync::Arc;

use super::span::{Annotations, SpanKind};
use super::spelling::{self, ForgetList, Redundancy};
use super::syntax;
use crate::dictionary::Dictionary;

pub struct AnnotationEngine {
    dictionary: Arc<dyn Dictionary>,
    forget_list: ForgetList,
    annotations: Annotations,
    spellcheck_enabled: bool,
    redundancy_cursor: usize,
}

impl std::fmt::Debug for AnnotationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationEngine")
            .field("forget_list", &self.forget_list)
            .field("annotations", &self.annotations.len())
            .field("spellcheck_enabled", &self.spellcheck_enabled)
            .field("redundancy_cursor", &self.redundancy_cursor)
            .finish()
    }
}

impl AnnotationEngine {
    pub fn new(dictionary: Arc<dyn Dictionary>, spellcheck_enabled: bool) -> Self {
        Self {
            dictionary,
            forget_list: ForgetList::new(),
            annotations: Annotations::new(),
            spellcheck_enabled,
            redundancy_cursor: 0,
        }
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dictionary.as_ref()
    }

    pub fn forget_list(&self) -> &ForgetList {
        &self.forget_list
    }

    pub fn spellcheck_enabled(&self) -> bool {
        self.spellcheck_enabled
    }

    /// Toggle the spelling/grammar scan and rescan `text`.
    pub fn set_spellcheck_enabled(&mut self, enabled: bool, text: &str) {
        if self.spellcheck_enabled != enabled {
            log::info!(
                "Spellcheck {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.spellcheck_enabled = enabled;
        self.refresh(text);
    }

    /// Full highlight pass: syntax layers always, prose layers when enabled.
    pub fn refresh(&mut self, text: &str) {
        syntax::highlight(text, &mut self.annotations);

        if self.spellcheck_enabled {
            spelling::scan(
                text,
                self.dictionary.as_ref(),
                &self.forget_list,
                &mut self.annotations,
            );
        } else {
            self.annotations.clear_kinds(&SpanKind::PROSE);
        }

        log::debug!(
            "Annotated {} bytes: {} spans",
            text.len(),
            self.annotations.len()
        );
    }

    /// True if `word` currently counts as misspelled.
    pub fn is_misspelled(&self, word: &str) -> bool {
        spelling::is_misspelled(word, self.dictionary.as_ref(), &self.forget_list)
    }

    pub fn candidates(&self, word: &str) -> Vec<String> {
        self.dictionary.candidates(&word.to_lowercase())
    }

    /// Exempt `word` from spelling flags and rescan.
    pub fn forget_word(&mut self, word: &str, text: &str) {
        if self.forget_list.forget(word) {
            log::info!("Forgot word '{}'", word.to_lowercase());
        }
        self.refresh(text);
    }

    /// Locate the next `word word` repeat from the search cursor. The cursor
    /// moves to the kept occurrence; when nothing is found it rewinds to 0.
    pub fn next_redundancy(&mut self, text: &str, word: &str) -> Option<Redundancy> {
        let from = self.redundancy_cursor.min(text.len());
        let from = (0..=from)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);

        match spelling::find_redundancy(text, word, from) {
            Some(found) => {
                self.redundancy_cursor = found.kept_start;
                Some(found)
            }
            None => {
                self.redundancy_cursor = 0;
                None
            }
        }
    }

    /// Forget per-document state when the buffer is replaced wholesale.
    pub fn reset_document_state(&mut self) {
        self.redundancy_cursor = 0;
        self.annotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::span::Span;
    use crate::dictionary::WordListDictionary;

    fn engine() -> AnnotationEngine {
        let mut dictionary = WordListDictionary::new();
        dictionary.extend_from_str("the\ncat\nsat\nhello\nhelp\n");
        AnnotationEngine::new(Arc::new(dictionary), true)
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut engine = engine();
        let text = "def helo():\n    return 'the the' # cat cat";
        engine.refresh(text);
        let first = engine.annotations().clone();
        engine.refresh(text);
        assert_eq!(&first, engine.annotations());
    }

    #[test]
    fn disabling_spellcheck_clears_prose_layers() {
        let mut engine = engine();
        let text = "if helo";
        engine.refresh(text);
        assert!(engine.annotations().has_kind(SpanKind::Misspelled));

        engine.set_spellcheck_enabled(false, text);
        assert!(!engine.annotations().has_kind(SpanKind::Misspelled));
        assert!(engine.annotations().has_kind(SpanKind::Keyword));
    }

    #[test]
    fn forget_word_rescans() {
        let mut engine = engine();
        let text = "helo cat";
        engine.refresh(text);
        engine.forget_word("Helo", text);
        assert!(!engine.annotations().has_kind(SpanKind::Misspelled));
        assert!(!engine.is_misspelled("HELO"));
    }

    #[test]
    fn redundancy_cursor_advances_and_rewinds() {
        let mut engine = engine();
        let text = "cat sat the the end";
        let found = engine.next_redundancy(text, "the").unwrap();
        assert_eq!(found.kept_start, 8);
        assert_eq!(found.remove, 11..15);

        // Cursor now sits on the kept occurrence; after the fix nothing follows.
        let fixed = "cat sat the end";
        assert!(engine.next_redundancy(fixed, "the").is_none());
        assert!(engine.next_redundancy("the the", "the").is_some());
    }

    #[test]
    fn stale_spans_do_not_leak_across_passes() {
        let mut engine = engine();
        engine.refresh("the the helo");
        engine.refresh("cat");
        assert_eq!(engine.annotations().to_vec(), Vec::<Span>::new());
    }
}
