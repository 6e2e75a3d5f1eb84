//! Suggestion Menu
//!
//! Right-click resolution of the word under the pointer and the spelling
//! and grammar actions offered for it.

use std::ops::Range;

use crate::annotate::spelling::{replace_word, word_tokens};
use crate::annotate::{AnnotationEngine, SpanKind};
use crate::document::{Document, DocumentError};

pub const NO_SUGGESTIONS: &str = "No suggestions";
pub const FORGET_WORD: &str = "Forget Word";
pub const REMOVE_REDUNDANCY: &str = "Remove Redundancy";

/// Something a menu item does to the buffer or the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// Rewrite every whole-word occurrence of `word` as `candidate`.
    Replace { word: String, candidate: String },
    /// Add the word to the forget list.
    ForgetWord(String),
    /// Drop the second word of the next `word word` repeat.
    RemoveRedundancy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Action {
        label: String,
        action: SuggestionAction,
    },
    Disabled(String),
    Separator,
}

impl MenuItem {
    pub fn label(&self) -> Option<&str> {
        match self {
            MenuItem::Action { label, .. } | MenuItem::Disabled(label) => Some(label),
            MenuItem::Separator => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, MenuItem::Action { .. })
    }
}

/// The popup built for one right-click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMenu {
    pub word: String,
    pub range: Range<usize>,
    items: Vec<MenuItem>,
}

/// Byte range of the word containing `offset`, or ending exactly at it.
pub fn word_at(text: &str, offset: usize) -> Option<Range<usize>> {
    word_tokens(text)
        .take_while(|range| range.start <= offset)
        .find(|range| offset <= range.end)
}

impl SuggestionMenu {
    /// Build the menu for a right-click at `offset`. Returns `None` when
    /// spellcheck is off, no word is under the pointer, or nothing applies.
    pub fn build(engine: &AnnotationEngine, text: &str, offset: usize) -> Option<Self> {
        if !engine.spellcheck_enabled() {
            return None;
        }

        let range = word_at(text, offset)?;
        let word = text[range.clone()].to_string();
        let mut items = Vec::new();

        if engine.is_misspelled(&word) {
            let candidates = engine.candidates(&word);
            if candidates.is_empty() {
                items.push(MenuItem::Disabled(NO_SUGGESTIONS.to_string()));
            }
            for candidate in candidates {
                items.push(MenuItem::Action {
                    label: candidate.clone(),
                    action: SuggestionAction::Replace {
                        word: word.clone(),
                        candidate,
                    },
                });
            }
            items.push(MenuItem::Separator);
            items.push(MenuItem::Action {
                label: FORGET_WORD.to_string(),
                action: SuggestionAction::ForgetWord(word.clone()),
            });
        }

        if engine.annotations().has_kind(SpanKind::Grammar) {
            items.push(MenuItem::Action {
                label: REMOVE_REDUNDANCY.to_string(),
                action: SuggestionAction::RemoveRedundancy(word.clone()),
            });
        }

        if items.is_empty() {
            return None;
        }

        Some(Self { word, range, items })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// The action behind item `index`, if it is an enabled item.
    pub fn action(&self, index: usize) -> Option<&SuggestionAction> {
        match self.items.get(index)? {
            MenuItem::Action { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Index of the first enabled item with this label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.is_enabled() && item.label() == Some(label))
    }
}

impl SuggestionAction {
    /// Run the action against the document. Returns true if the buffer changed.
    /// The engine is refreshed afterwards in every case.
    pub fn apply(
        &self,
        engine: &mut AnnotationEngine,
        document: &mut Document,
    ) -> Result<bool, DocumentError> {
        let changed = match self {
            SuggestionAction::Replace { word, candidate } => {
                match replace_word(document.text(), word, candidate) {
                    Some(replaced) => {
                        log::info!("Replaced '{}' with '{}'", word, candidate);
                        document.set_text(replaced);
                        true
                    }
                    None => false,
                }
            }
            SuggestionAction::ForgetWord(word) => {
                engine.forget_word(word, document.text());
                false
            }
            SuggestionAction::RemoveRedundancy(word) => {
                match engine.next_redundancy(document.text(), word) {
                    Some(found) => {
                        document.delete(found.remove)?;
                        true
                    }
                    None => {
                        log::debug!("No repeated '{}' left to remove", word);
                        false
                    }
                }
            }
        };

        engine.refresh(document.text());
        Ok(changed)
    }
}
