//! Window Surface
//!
//! Everything the editor needs from a windowing toolkit: modal dialogs, the
//! popup menu, the preferences form and a place to render. The editor only
//! talks to this trait; `terminal` is the shipped implementation.

pub mod render;
pub mod terminal;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::preferences::PreferencesDialog;
use crate::settings::Color;
use crate::suggest::SuggestionMenu;

pub use render::View;
pub use terminal::TerminalFrontend;

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    Save,
    Discard,
    Cancel,
}

/// A file-type filter shown by the open and save pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub pattern: &'static str,
}

pub const DOCUMENT_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "Text Files",
        pattern: "*.txt",
    },
    FileFilter {
        name: "Python Files",
        pattern: "*.py",
    },
    FileFilter {
        name: "All Files",
        pattern: "*.*",
    },
];

/// Dialogs and rendering provided by the host window.
///
/// Every `async` method is modal: the event loop waits for the answer and
/// `None` always means the user cancelled.
#[async_trait(?Send)]
pub trait Frontend {
    async fn confirm_unsaved(&mut self) -> UnsavedChoice;

    async fn pick_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;

    async fn pick_save_path(
        &mut self,
        default_extension: &str,
        filters: &[FileFilter],
    ) -> Option<PathBuf>;

    async fn pick_color(&mut self, current: &Color) -> Option<Color>;

    /// Post the popup menu and return the index of the chosen item.
    async fn choose(&mut self, menu: &SuggestionMenu) -> Option<usize>;

    /// Run the preferences form. Returns true when the user pressed Apply.
    async fn edit_preferences(&mut self, dialog: &mut PreferencesDialog) -> bool;

    fn show_info(&mut self, title: &str, message: &str);

    fn show_error(&mut self, title: &str, message: &str);

    /// Print auxiliary output such as help text or span dumps.
    fn display(&mut self, text: &str);

    fn render(&mut self, view: &View<'_>);
}
