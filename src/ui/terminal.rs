//! Line-oriented terminal window.
//!
//! Menu actions are `:`-commands, any other line is typed into the buffer,
//! and every dialog is a prompt answered on the next input line. A blank
//! answer (or end of input) cancels the dialog.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use super::render::{View, paint};
use super::{FileFilter, Frontend, UnsavedChoice};
use crate::editor::Action;
use crate::preferences::PreferencesDialog;
use crate::settings::{Color, FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::suggest::{MenuItem, SuggestionMenu};

pub const HELP: &str = "\
Commands:
  :new                     start a new document
  :open                    open a file
  :save                    save the document
  :saveas                  save under a new name
  :prefs                   edit preferences
  :quit                    exit the editor
  :insert <offset> <text>  insert text at a byte offset
  :delete <start> <end>    delete a byte range
  :menu <offset>           right-click at a byte offset
  :show                    redraw the window
  :spans                   print annotation spans as JSON
  :help                    show this help
Any other line is appended to the buffer.";

const PREFERENCES_HELP: &str = "\
Preferences commands: autosave on|off, spellcheck on|off, font <8-32>,
misspelled-color, grammar-color, apply, close";

/// Parse one input line into an editor action.
pub fn parse_action(line: &str) -> Result<Action, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Action::Type(format!("{line}\n")));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim_start()))
        .unwrap_or((command, ""));

    let offset = |value: &str| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("expected a byte offset, got '{}'", value.trim()))
    };

    match name {
        "new" => Ok(Action::New),
        "open" => Ok(Action::Open),
        "save" => Ok(Action::Save),
        "saveas" => Ok(Action::SaveAs),
        "prefs" | "preferences" => Ok(Action::Preferences),
        "quit" | "exit" | "q" => Ok(Action::Exit),
        "show" => Ok(Action::Show),
        "spans" => Ok(Action::Spans),
        "help" => Ok(Action::Help),
        "menu" => Ok(Action::ContextMenu {
            offset: offset(rest)?,
        }),
        "insert" => {
            let (at, text) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: :insert <offset> <text>".to_string())?;
            Ok(Action::Insert {
                offset: offset(at)?,
                text: text.to_string(),
            })
        }
        "delete" => {
            let (start, end) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: :delete <start> <end>".to_string())?;
            Ok(Action::Delete {
                start: offset(start)?,
                end: offset(end)?,
            })
        }
        other => Err(format!("unknown command ':{other}' (try :help)")),
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

pub struct TerminalFrontend<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> TerminalFrontend<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Next raw input line, `None` at end of input.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Print `question` and wait for an answer. Blank or end of input is `None`.
    async fn ask(&mut self, question: &str) -> Option<String> {
        self.emit(question);
        match self.lines.next_line().await {
            Ok(Some(answer)) => {
                let answer = answer.trim();
                (!answer.is_empty()).then(|| answer.to_string())
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read answer: {}", e);
                None
            }
        }
    }

    fn describe_filters(filters: &[FileFilter]) -> String {
        filters
            .iter()
            .map(|f| format!("{} ({})", f.name, f.pattern))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn describe_preferences(dialog: &PreferencesDialog) -> String {
        let draft = dialog.draft();
        format!(
            "Preferences{}\n  autosave:         {}\n  spellcheck:       {}\n  font size:        {}\n  misspelled color: {}\n  grammar color:    {}",
            if dialog.differs_from_saved() {
                " (differs from saved config)"
            } else {
                ""
            },
            draft.autosave_enabled,
            draft.spellcheck_enabled,
            draft.font_size,
            draft.misspelled_color,
            draft.grammar_color,
        )
    }
}

#[async_trait(?Send)]
impl<R, W> Frontend for TerminalFrontend<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    async fn confirm_unsaved(&mut self) -> UnsavedChoice {
        let answer = self
            .ask("You have unsaved changes. Save before continuing? [y]es / [n]o / [c]ancel")
            .await;
        match answer.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("y" | "yes") => UnsavedChoice::Save,
            Some("n" | "no") => UnsavedChoice::Discard,
            _ => UnsavedChoice::Cancel,
        }
    }

    async fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        let question = format!(
            "Open file [{}] (blank to cancel):",
            Self::describe_filters(filters)
        );
        self.ask(&question).await.map(PathBuf::from)
    }

    async fn pick_save_path(
        &mut self,
        default_extension: &str,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        let question = format!(
            "Save as [{}], default extension .{} (blank to cancel):",
            Self::describe_filters(filters),
            default_extension
        );
        self.ask(&question).await.map(PathBuf::from)
    }

    async fn pick_color(&mut self, current: &Color) -> Option<Color> {
        let question = format!("Color (#rrggbb or name, blank keeps {current}):");
        let answer = self.ask(&question).await?;
        match answer.parse::<Color>() {
            Ok(color) => Some(color),
            Err(e) => {
                self.show_error("Color", &e.to_string());
                None
            }
        }
    }

    async fn choose(&mut self, menu: &SuggestionMenu) -> Option<usize> {
        let mut listing = format!("Suggestions for '{}':", menu.word);
        for (index, item) in menu.items().iter().enumerate() {
            let line = match item {
                MenuItem::Action { label, .. } => format!("\n  {}. {}", index + 1, label),
                MenuItem::Disabled(label) => format!("\n  -. {label}"),
                MenuItem::Separator => "\n  ----".to_string(),
            };
            listing.push_str(&line);
        }
        self.emit(&listing);

        let answer = self.ask("Select item (blank to dismiss):").await?;
        match answer.parse::<usize>() {
            Ok(n) if n >= 1 => Some(n - 1),
            _ => None,
        }
    }

    async fn edit_preferences(&mut self, dialog: &mut PreferencesDialog) -> bool {
        loop {
            let form = Self::describe_preferences(dialog);
            self.emit(&form);

            let Some(line) = self.ask("preferences>").await else {
                return false;
            };
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some("autosave"), Some(value)) => match parse_switch(value) {
                    Some(enabled) => dialog.set_autosave(enabled),
                    None => self.emit("expected on or off"),
                },
                (Some("spellcheck"), Some(value)) => match parse_switch(value) {
                    Some(enabled) => dialog.set_spellcheck(enabled),
                    None => self.emit("expected on or off"),
                },
                (Some("font"), Some(value)) => match value.parse::<i64>() {
                    Ok(size) => {
                        let applied = dialog.set_font_size(size);
                        if i64::from(applied) != size {
                            let note = format!(
                                "font size must be {FONT_SIZE_MIN}-{FONT_SIZE_MAX}, using {applied}"
                            );
                            self.emit(&note);
                        }
                    }
                    Err(_) => self.emit("expected a number"),
                },
                (Some("misspelled-color"), None) => {
                    dialog.choose_misspelled_color(&mut *self).await;
                }
                (Some("grammar-color"), None) => {
                    dialog.choose_grammar_color(&mut *self).await;
                }
                (Some("apply"), None) => return true,
                (Some("close"), None) => return false,
                _ => self.emit(PREFERENCES_HELP),
            }
        }
    }

    fn show_info(&mut self, title: &str, message: &str) {
        self.emit(&format!("[{title}] {message}"));
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.emit(&format!("[{title}] error: {message}"));
    }

    fn display(&mut self, text: &str) {
        self.emit(text);
    }

    fn render(&mut self, view: &View<'_>) {
        let painted = paint(view);
        let status = view.status_line();
        self.emit(&format!("{painted}\n{status}"));
    }
}
