//! Spelling and Grammar Scan
//!
//! Misspelled-word and repeated-word detection over the whole buffer, plus
//! the buffer rewrites offered by the suggestion menu.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{NoExpand, Regex, RegexBuilder};

use super::span::{Annotations, SpanKind};
use crate::dictionary::Dictionary;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word pattern"));

/// Words the user declared correctly spelled for this session.
#[derive(Debug, Clone, Default)]
pub struct ForgetList {
    words: HashSet<String>,
}

impl ForgetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the word was already forgotten.
    pub fn forget(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Byte ranges of every word token in `text`.
pub fn word_tokens(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    WORD_RE.find_iter(text).map(|m| m.range())
}

/// Only purely alphabetic tokens are spellchecked. Numbers and identifiers
/// such as `x1` or `snake_case` are left alone.
pub fn is_checkable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// True if `word` should carry a misspelled tag.
pub fn is_misspelled(word: &str, dictionary: &dyn Dictionary, forget_list: &ForgetList) -> bool {
    if !is_checkable(word) {
        return false;
    }
    let lower = word.to_lowercase();
    dictionary.is_unknown(&lower) && !forget_list.contains(&lower)
}

/// Clear the misspelled and grammar layers and rescan `text`.
pub fn scan(
    text: &str,
    dictionary: &dyn Dictionary,
    forget_list: &ForgetList,
    annotations: &mut Annotations,
) {
    annotations.clear_kinds(&SpanKind::PROSE);
    tag_misspellings(text, dictionary, forget_list, annotations);
    tag_repeated_words(text, annotations);
}

fn tag_misspellings(
    text: &str,
    dictionary: &dyn Dictionary,
    forget_list: &ForgetList,
    annotations: &mut Annotations,
) {
    let mut unknown = HashSet::new();
    let mut known = HashSet::new();

    for range in word_tokens(text) {
        let lower = text[range.clone()].to_lowercase();
        if known.contains(&lower) {
            continue;
        }
        if unknown.contains(&lower) || is_misspelled(&lower, dictionary, forget_list) {
            annotations.add(SpanKind::Misspelled, range);
            unknown.insert(lower);
        } else {
            known.insert(lower);
        }
    }

    if !unknown.is_empty() {
        log::debug!("Spellcheck flagged {} distinct words", unknown.len());
    }
}

/// Tag `W <whitespace> W` pairs. Matching is case-sensitive and a word that
/// closes one pair never opens the next.
fn tag_repeated_words(text: &str, annotations: &mut Annotations) {
    let tokens: Vec<Range<usize>> = word_tokens(text).collect();
    let mut i = 0;

    while i + 1 < tokens.len() {
        let (first, second) = (&tokens[i], &tokens[i + 1]);
        if is_repeat(text, first, second) {
            annotations.add(SpanKind::Grammar, first.start..second.end);
            i += 2;
        } else {
            i += 1;
        }
    }
}

fn is_repeat(text: &str, first: &Range<usize>, second: &Range<usize>) -> bool {
    let gap = &text[first.end..second.start];
    !gap.is_empty()
        && gap.chars().all(char::is_whitespace)
        && text[first.clone()] == text[second.clone()]
}

fn whole_word_pattern(word: &str, case_insensitive: bool) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// Replace every whole-word, case-insensitive occurrence of `old` with `new`.
/// Returns `None` when nothing matched.
pub fn replace_word(text: &str, old: &str, new: &str) -> Option<String> {
    let pattern = whole_word_pattern(old, true)?;
    if !pattern.is_match(text) {
        return None;
    }
    Some(pattern.replace_all(text, NoExpand(new)).into_owned())
}

/// A repeated word found by [`find_redundancy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redundancy {
    /// Start of the occurrence that is kept.
    pub kept_start: usize,
    /// Whitespace plus the second occurrence, to be deleted.
    pub remove: Range<usize>,
}

/// First `word <whitespace> word` at or after `from`.
pub fn find_redundancy(text: &str, word: &str, from: usize) -> Option<Redundancy> {
    if word.is_empty() || from > text.len() || !text.is_char_boundary(from) {
        return None;
    }

    let escaped = regex::escape(word);
    let pattern = Regex::new(&format!(r"\b{escaped}\s+{escaped}\b")).ok()?;
    let m = pattern.find_at(text, from)?;

    Some(Redundancy {
        kept_start: m.start(),
        remove: m.start() + word.len()..m.end(),
    })
}
