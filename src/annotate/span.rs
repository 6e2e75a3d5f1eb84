//! Annotation spans and the tag layer that holds them.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::Serialize;

/// What a span marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Keyword,
    String,
    Comment,
    Misspelled,
    Grammar,
}

impl SpanKind {
    /// Kinds owned by the syntax highlighter, in scan order.
    pub const SYNTAX: [SpanKind; 3] = [SpanKind::Keyword, SpanKind::String, SpanKind::Comment];

    /// Kinds owned by the spelling/grammar scan.
    pub const PROSE: [SpanKind; 2] = [SpanKind::Misspelled, SpanKind::Grammar];
}

/// A labeled byte range over the buffer, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl Span {
    pub fn new(kind: SpanKind, range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            kind,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Every span produced by the last pass. Identical spans are stored once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    spans: BTreeSet<Span>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: SpanKind, range: Range<usize>) {
        if range.start < range.end {
            self.spans.insert(Span::new(kind, range));
        }
    }

    /// Drop every span of the given kinds.
    pub fn clear_kinds(&mut self, kinds: &[SpanKind]) {
        self.spans.retain(|span| !kinds.contains(&span.kind));
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    pub fn of_kind(&self, kind: SpanKind) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.kind == kind)
    }

    pub fn has_kind(&self, kind: SpanKind) -> bool {
        self.spans.iter().any(|span| span.kind == kind)
    }

    /// Spans covering `offset`.
    pub fn at(&self, offset: usize) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.contains(offset))
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Span> {
        self.spans.iter().copied().collect()
    }
}
