//! Syntax Highlighting
//!
//! Fixed regular expressions for keywords, quoted strings and line comments.

use std::sync::LazyLock;

use regex::Regex;

use super::span::{Annotations, SpanKind};
use crate::settings::Color;

/// Keywords highlighted in every buffer.
pub const KEYWORDS: &[&str] = &[
    "def", "class", "if", "else", "elif", "while", "for", "return", "import", "from", "with",
    "as", "try", "except", "finally", "break", "continue", "lambda",
];

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", KEYWORDS.join("|"))).expect("valid keyword pattern")
});

// A string closes on the quote that opened it and never spans lines.
static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]*"|'[^'\n]*'"#).expect("valid string pattern"));

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#.*").expect("valid comment pattern"));

/// Patterns in scan order. Later classes are applied on top of earlier ones.
fn patterns() -> [(SpanKind, &'static Regex); 3] {
    [
        (SpanKind::Keyword, &*KEYWORD_RE),
        (SpanKind::String, &*STRING_RE),
        (SpanKind::Comment, &*COMMENT_RE),
    ]
}

/// Clear the syntax layers and rescan `text`.
pub fn highlight(text: &str, annotations: &mut Annotations) {
    annotations.clear_kinds(&SpanKind::SYNTAX);

    for (kind, pattern) in patterns() {
        for m in pattern.find_iter(text) {
            annotations.add(kind, m.range());
        }
    }
}

/// Paint priority of a syntax kind: later scan classes draw over earlier
/// ones. Prose kinds rank below every syntax kind.
pub fn syntax_rank(kind: SpanKind) -> usize {
    SpanKind::SYNTAX
        .iter()
        .position(|&k| k == kind)
        .map_or(0, |index| index + 1)
}

/// Fixed foreground color for a syntax span kind.
pub fn syntax_color(kind: SpanKind) -> Option<Color> {
    match kind {
        SpanKind::Keyword => Some(Color::from_parts("blue", [0x00, 0x00, 0xff])),
        SpanKind::String => Some(Color::from_parts("green", [0x00, 0x80, 0x00])),
        SpanKind::Comment => Some(Color::from_parts("gray", [0x80, 0x80, 0x80])),
        SpanKind::Misspelled | SpanKind::Grammar => None,
    }
}
