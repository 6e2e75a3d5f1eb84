//! Spelling Dictionary
//!
//! The spelling collaborator consulted by the annotation engine and the
//! suggestion menu. Words are always passed in lowercase.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

const BUILTIN_WORDS: &str = include_str!("../../resources/words.txt");
const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Largest edit distance a candidate may be from the word.
const MAX_DISTANCE: usize = 2;

/// Lookup operations the editor needs from a dictionary.
pub trait Dictionary: Send + Sync {
    /// True when `word` is not a known word.
    fn is_unknown(&self, word: &str) -> bool;

    /// Known words close to `word`, best guesses first.
    fn candidates(&self, word: &str) -> Vec<String>;
}

/// Dictionary backed by a plain set of known words.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: HashSet<String>,
    longest: usize,
}

impl WordListDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The word list shipped with the editor.
    pub fn builtin() -> Self {
        let mut dictionary = Self::new();
        dictionary.extend_from_str(BUILTIN_WORDS);
        dictionary
    }

    /// Add every word from a word-list file (one word per line, `#` comments).
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;
        let added = self.extend_from_str(&content);
        log::info!("Loaded {} words from {}", added, path.display());
        Ok(added)
    }

    /// Add words from word-list text, returning how many were new.
    pub fn extend_from_str(&mut self, content: &str) -> usize {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter(|word| self.insert(word))
            .count()
    }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.longest = self.longest.max(word.chars().count());
        self.words.insert(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn known<'a>(&self, words: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
        words
            .into_iter()
            .filter(|w| self.words.contains(w.as_str()))
            .cloned()
            .collect()
    }
}

impl Dictionary for WordListDictionary {
    fn is_unknown(&self, word: &str) -> bool {
        !self.words.contains(word)
    }

    fn candidates(&self, word: &str) -> Vec<String> {
        if self.words.contains(word) {
            return vec![word.to_string()];
        }

        // Nothing can be within reach of a word this long.
        let length = word.chars().count();
        if length > self.longest + MAX_DISTANCE {
            return Vec::new();
        }

        let close = self.known(&edits1(word));
        if !close.is_empty() {
            return close.into_iter().collect();
        }

        // Two edits away: compare against the word list instead of expanding
        // every single edit a second time.
        let target: Vec<char> = word.chars().collect();
        let two_away: BTreeSet<String> = self
            .words
            .iter()
            .filter(|known| known.chars().count().abs_diff(length) <= MAX_DISTANCE)
            .filter(|known| {
                let known: Vec<char> = known.chars().collect();
                within_distance(&target, &known, MAX_DISTANCE)
            })
            .cloned()
            .collect();
        two_away.into_iter().collect()
    }
}

/// All strings one delete, transpose, replace or insert away from `word`.
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = HashSet::new();

    for i in 0..=chars.len() {
        let (left, right) = chars.split_at(i);
        let left: String = left.iter().collect();

        if let Some((_, rest)) = right.split_first() {
            let rest: String = rest.iter().collect();
            edits.insert(format!("{left}{rest}"));

            for c in ALPHABET.chars() {
                edits.insert(format!("{left}{c}{rest}"));
            }
        }

        if right.len() > 1 {
            let tail: String = right[2..].iter().collect();
            edits.insert(format!("{left}{}{}{tail}", right[1], right[0]));
        }

        let right: String = right.iter().collect();
        for c in ALPHABET.chars() {
            edits.insert(format!("{left}{c}{right}"));
        }
    }

    edits.remove(word);
    edits
}

/// Optimal string alignment distance between `a` and `b` is at most `limit`.
/// Rows whose minimum already exceeds the limit end the search early.
fn within_distance(a: &[char], b: &[char], limit: usize) -> bool {
    if a.len().abs_diff(b.len()) > limit {
        return false;
    }

    let width = b.len() + 1;
    let mut before: Vec<usize> = vec![0; width];
    let mut previous: Vec<usize> = (0..width).collect();
    let mut current: Vec<usize> = vec![0; width];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..width {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(before[j - 2] + 1);
            }
            current[j] = best;
        }
        if current.iter().min().is_some_and(|&min| min > limit) {
            return false;
        }
        std::mem::swap(&mut before, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()] <= limit
}
