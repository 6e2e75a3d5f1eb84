//! Main Window
//!
//! Composes settings, the document, the annotation engine and the window
//! surface, and runs the event loop that feeds them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;

use crate::annotate::AnnotationEngine;
use crate::dictionary::Dictionary;
use crate::document::{AutosaveTick, Document, DocumentController, DocumentError, Outcome};
use crate::preferences::PreferencesDialog;
use crate::settings::{Settings, SettingsStore};
use crate::suggest::SuggestionMenu;
use crate::ui::terminal::{HELP, parse_action};
use crate::ui::{Frontend, TerminalFrontend, View};

/// Everything the user can ask the window to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    New,
    Open,
    Save,
    SaveAs,
    Preferences,
    Exit,
    /// Text typed at the end of the buffer.
    Type(String),
    Insert {
        offset: usize,
        text: String,
    },
    Delete {
        start: usize,
        end: usize,
    },
    /// Right-click at a byte offset.
    ContextMenu {
        offset: usize,
    },
    Show,
    Spans,
    Help,
}

pub struct Editor {
    store: SettingsStore,
    controller: DocumentController,
    engine: AnnotationEngine,
    font_size: u8,
    running: bool,
}

impl Editor {
    pub fn new(store: SettingsStore, dictionary: Arc<dyn Dictionary>) -> Self {
        let settings = store.settings();
        let engine = AnnotationEngine::new(dictionary, settings.spellcheck_enabled);
        let font_size = settings.font_size;

        Self {
            store,
            controller: DocumentController::new(),
            engine,
            font_size,
            running: true,
        }
    }

    /// A session over default settings. The file at `config_path` is not
    /// read here; the Preferences dialog reads it and Apply rewrites it.
    pub fn with_defaults(
        config_path: impl Into<PathBuf>,
        dictionary: Arc<dyn Dictionary>,
    ) -> Self {
        Self::new(SettingsStore::with_defaults(config_path), dictionary)
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn document(&self) -> &Document {
        self.controller.document()
    }

    pub fn engine(&self) -> &AnnotationEngine {
        &self.engine
    }

    /// Font size the text surface is currently drawn with.
    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn view(&self) -> View<'_> {
        View {
            title: self.document().title(),
            text: self.document().text(),
            annotations: self.engine.annotations(),
            settings: self.store.settings(),
            font_size: self.font_size,
        }
    }

    /// Run one user action, then redraw if anything visible changed.
    pub async fn execute<F: Frontend + ?Sized>(&mut self, action: Action, frontend: &mut F) {
        let redraw = match action {
            Action::New => {
                let outcome = self.controller.new_file(frontend).await;
                self.after_reload(outcome)
            }
            Action::Open => {
                let outcome = self.controller.open_file(frontend).await;
                self.after_reload(outcome)
            }
            Action::Save => self.controller.save(frontend).await.is_completed(),
            Action::SaveAs => self.controller.save_as(frontend).await.is_completed(),
            Action::Preferences => self.open_preferences(frontend).await,
            Action::Exit => {
                log::info!("Exiting");
                self.running = false;
                false
            }
            Action::Type(text) => {
                self.controller.document_mut().append(&text);
                self.on_edit();
                true
            }
            Action::Insert { offset, text } => {
                let result = self.controller.document_mut().insert(offset, &text);
                self.finish_edit(result, frontend)
            }
            Action::Delete { start, end } => {
                let result = self.controller.document_mut().delete(start..end);
                self.finish_edit(result, frontend)
            }
            Action::ContextMenu { offset } => self.context_menu(offset, frontend).await,
            Action::Show => true,
            Action::Spans => {
                match serde_json::to_string_pretty(&self.engine.annotations().to_vec()) {
                    Ok(json) => frontend.display(&json),
                    Err(e) => frontend.show_error("Spans", &e.to_string()),
                }
                false
            }
            Action::Help => {
                frontend.display(HELP);
                false
            }
        };

        if redraw {
            frontend.render(&self.view());
        }
    }

    /// Load the file named on the command line, if any.
    pub async fn open_initial<F: Frontend + ?Sized>(&mut self, path: &Path, frontend: &mut F) {
        let outcome = self.controller.open_path(path, frontend).await;
        if self.after_reload(outcome) {
            frontend.render(&self.view());
        }
    }

    /// Keystroke hook: recompute every span for the current buffer.
    pub fn on_edit(&mut self) {
        self.engine.refresh(self.controller.document().text());
    }

    fn finish_edit<F: Frontend + ?Sized>(
        &mut self,
        result: Result<(), DocumentError>,
        frontend: &mut F,
    ) -> bool {
        match result {
            Ok(()) => {
                self.on_edit();
                true
            }
            Err(e) => {
                frontend.show_error("Edit", &e.to_string());
                false
            }
        }
    }

    fn after_reload(&mut self, outcome: Outcome) -> bool {
        if !outcome.is_completed() {
            return false;
        }
        self.engine.reset_document_state();
        self.on_edit();
        true
    }

    /// Right-click at `offset`: post the suggestion menu and run the choice.
    pub async fn context_menu<F: Frontend + ?Sized>(
        &mut self,
        offset: usize,
        frontend: &mut F,
    ) -> bool {
        let text = self.controller.document().text();
        let Some(menu) = SuggestionMenu::build(&self.engine, text, offset) else {
            return false;
        };
        let Some(index) = frontend.choose(&menu).await else {
            return false;
        };
        let Some(action) = menu.action(index) else {
            return false;
        };

        match action.apply(&mut self.engine, self.controller.document_mut()) {
            Ok(_) => true,
            Err(e) => {
                frontend.show_error("Edit", &e.to_string());
                self.on_edit();
                true
            }
        }
    }

    /// Show the preferences form; on Apply, commit, persist and refresh.
    pub async fn open_preferences<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> bool {
        let mut dialog = PreferencesDialog::open(&self.store);
        if !frontend.edit_preferences(&mut dialog).await {
            dialog.close();
            return false;
        }

        let font_size = &mut self.font_size;
        let engine = &mut self.engine;
        let text = self.controller.document().text();
        dialog.apply(&mut self.store, |settings| {
            *font_size = settings.font_size;
            engine.set_spellcheck_enabled(settings.spellcheck_enabled, text);
        });
        log::info!("Applied preferences");
        true
    }

    /// Handle one autosave tick. Returns true if the file was written.
    pub async fn autosave_tick(&mut self) -> bool {
        let enabled = self.store.settings().autosave_enabled;
        self.controller.autosave(enabled).await
    }
}

enum SessionEvent {
    Input(std::io::Result<Option<String>>),
    Autosave,
}

/// Event loop: user input lines and autosave ticks, one at a time.
/// Returns when the user exits or input ends.
pub async fn run_session<R, W>(
    editor: &mut Editor,
    frontend: &mut TerminalFrontend<R, W>,
    ticks: &mut mpsc::UnboundedReceiver<AutosaveTick>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: std::io::Write,
{
    frontend.render(&editor.view());

    while editor.is_running() {
        let event = tokio::select! {
            line = frontend.next_line() => SessionEvent::Input(line),
            Some(AutosaveTick) = ticks.recv() => SessionEvent::Autosave,
        };

        match event {
            SessionEvent::Input(line) => {
                let Some(line) = line.context("Failed to read input")? else {
                    log::info!("End of input");
                    break;
                };
                match parse_action(&line) {
                    Ok(action) => editor.execute(action, frontend).await,
                    Err(message) => frontend.show_error("Command", &message),
                }
            }
            SessionEvent::Autosave => {
                editor.autosave_tick().await;
            }
        }
    }

    Ok(())
}
