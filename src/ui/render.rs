//! ANSI rendering of the text surface.

use crate::annotate::syntax::{syntax_color, syntax_rank};
use crate::annotate::{Annotations, SpanKind};
use crate::settings::{Color, Settings};

const RESET: &str = "\x1b[0m";
const UNDERLINE: &str = "\x1b[4m";

/// Snapshot of everything the window shows.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub title: String,
    pub text: &'a str,
    pub annotations: &'a Annotations,
    pub settings: &'a Settings,
    pub font_size: u8,
}

impl View<'_> {
    pub fn status_line(&self) -> String {
        format!(
            "-- {} | {}pt | spellcheck {} | autosave {} --",
            self.title,
            self.font_size,
            on_off(self.settings.spellcheck_enabled),
            on_off(self.settings.autosave_enabled),
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Style {
    foreground: Option<Color>,
    underline: bool,
}

impl Style {
    /// Syntax colors win over the prose tag colors; prose tags always underline.
    /// Among syntax kinds, comment beats string beats keyword.
    fn for_offset(offset: usize, annotations: &Annotations, settings: &Settings) -> Self {
        let mut style = Style::default();
        let mut syntax_kind: Option<SpanKind> = None;

        for span in annotations.at(offset) {
            match span.kind {
                SpanKind::Keyword | SpanKind::String | SpanKind::Comment => {
                    let outranks = syntax_kind
                        .is_none_or(|kind| syntax_rank(span.kind) > syntax_rank(kind));
                    if outranks {
                        syntax_kind = Some(span.kind);
                    }
                }
                SpanKind::Misspelled => {
                    style.underline = true;
                    style.foreground.get_or_insert(settings.misspelled_color.clone());
                }
                SpanKind::Grammar => {
                    style.underline = true;
                    style.foreground = Some(settings.grammar_color.clone());
                }
            }
        }

        if let Some(color) = syntax_kind.and_then(syntax_color) {
            style.foreground = Some(color);
        }
        style
    }

    fn escape(&self) -> String {
        let mut out = String::new();
        if let Some(color) = &self.foreground {
            let [r, g, b] = color.rgb();
            out.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
        }
        if self.underline {
            out.push_str(UNDERLINE);
        }
        out
    }
}

/// Paint the buffer with one escape sequence per styled run.
pub fn paint(view: &View<'_>) -> String {
    let text = view.text;
    let mut boundaries: Vec<usize> = view
        .annotations
        .iter()
        .flat_map(|span| [span.start, span.end])
        .filter(|&offset| offset <= text.len() && text.is_char_boundary(offset))
        .collect();
    boundaries.push(0);
    boundaries.push(text.len());
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut out = String::with_capacity(text.len());
    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let style = Style::for_offset(start, view.annotations, view.settings);
        let segment = &text[start..end];
        if style == Style::default() {
            out.push_str(segment);
        } else {
            out.push_str(&style.escape());
            out.push_str(segment);
            out.push_str(RESET);
        }
    }
    out
}
