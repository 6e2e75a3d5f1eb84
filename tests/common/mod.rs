//! Scripted window used by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use vertex_ideas::preferences::PreferencesDialog;
use vertex_ideas::settings::Color;
use vertex_ideas::suggest::SuggestionMenu;
use vertex_ideas::ui::{FileFilter, Frontend, UnsavedChoice, View};
use vertex_ideas::{Editor, WordListDictionary};

type PreferencesScript = Box<dyn FnOnce(&mut PreferencesDialog) -> bool>;

/// Answers every dialog from a queue and records what the editor showed.
/// An empty queue answers like a cancelled dialog.
#[derive(Default)]
pub struct ScriptedFrontend {
    pub unsaved: VecDeque<UnsavedChoice>,
    pub open_paths: VecDeque<PathBuf>,
    pub save_paths: VecDeque<PathBuf>,
    pub colors: VecDeque<Color>,
    /// Labels to pick from the suggestion menu.
    pub menu_choices: VecDeque<String>,
    pub preferences: VecDeque<PreferencesScript>,

    pub menus: Vec<SuggestionMenu>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
    pub displayed: Vec<String>,
    pub titles: Vec<String>,
    pub font_sizes: Vec<u8>,
    pub unsaved_prompts: usize,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose_label(mut self, label: &str) -> Self {
        self.menu_choices.push_back(label.to_string());
        self
    }

    pub fn answer_unsaved(mut self, choice: UnsavedChoice) -> Self {
        self.unsaved.push_back(choice);
        self
    }

    pub fn open_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.open_paths.push_back(path.into());
        self
    }

    pub fn save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_paths.push_back(path.into());
        self
    }

    pub fn edit_preferences_with(
        mut self,
        script: impl FnOnce(&mut PreferencesDialog) -> bool + 'static,
    ) -> Self {
        self.preferences.push_back(Box::new(script));
        self
    }
}

#[async_trait(?Send)]
impl Frontend for ScriptedFrontend {
    async fn confirm_unsaved(&mut self) -> UnsavedChoice {
        self.unsaved_prompts += 1;
        self.unsaved.pop_front().unwrap_or(UnsavedChoice::Cancel)
    }

    async fn pick_open_path(&mut self, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.open_paths.pop_front()
    }

    async fn pick_save_path(
        &mut self,
        _default_extension: &str,
        _filters: &[FileFilter],
    ) -> Option<PathBuf> {
        self.save_paths.pop_front()
    }

    async fn pick_color(&mut self, _current: &Color) -> Option<Color> {
        self.colors.pop_front()
    }

    async fn choose(&mut self, menu: &SuggestionMenu) -> Option<usize> {
        self.menus.push(menu.clone());
        let label = self.menu_choices.pop_front()?;
        menu.position(&label)
    }

    async fn edit_preferences(&mut self, dialog: &mut PreferencesDialog) -> bool {
        match self.preferences.pop_front() {
            Some(script) => script(dialog),
            None => false,
        }
    }

    fn show_info(&mut self, _title: &str, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_error(&mut self, _title: &str, message: &str) {
        self.errors.push(message.to_string());
    }

    fn display(&mut self, text: &str) {
        self.displayed.push(text.to_string());
    }

    fn render(&mut self, view: &View<'_>) {
        self.titles.push(view.title.clone());
        self.font_sizes.push(view.font_size);
    }
}

/// A fresh session over the built-in dictionary whose settings persist to `config`.
pub fn editor_with_config(config: impl Into<PathBuf>) -> Editor {
    Editor::with_defaults(config, Arc::new(WordListDictionary::builtin()))
}
