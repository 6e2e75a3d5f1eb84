//! Preferences Dialog
//!
//! A modal form over a draft copy of the settings. Nothing reaches the live
//! settings until Apply.

use crate::settings::{Color, Settings, SettingsStore, clamp_font_size};
use crate::ui::Frontend;

/// Which highlight color a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Misspelled,
    Grammar,
}

#[derive(Debug, Clone)]
pub struct PreferencesDialog {
    draft: Settings,
    on_disk: Settings,
}

impl PreferencesDialog {
    /// Seed a draft from the live settings. The config file is read again so
    /// the form can tell whether the live session differs from what is saved.
    pub fn open(store: &SettingsStore) -> Self {
        let on_disk = SettingsStore::load(store.path()).settings().clone();
        Self {
            draft: store.settings().clone(),
            on_disk,
        }
    }

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    /// True when the draft would change the config file.
    pub fn differs_from_saved(&self) -> bool {
        self.draft != self.on_disk
    }

    pub fn set_autosave(&mut self, enabled: bool) {
        self.draft.autosave_enabled = enabled;
    }

    pub fn set_spellcheck(&mut self, enabled: bool) {
        self.draft.spellcheck_enabled = enabled;
    }

    /// Set the font size, clamped to the spinner range. Returns the stored value.
    pub fn set_font_size(&mut self, size: i64) -> u8 {
        let clamped = clamp_font_size(size);
        if i64::from(clamped) != size {
            log::info!("Font size {} out of range, using {}", size, clamped);
        }
        self.draft.font_size = clamped;
        clamped
    }

    pub fn set_color(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Misspelled => self.draft.misspelled_color = color,
            ColorTarget::Grammar => self.draft.grammar_color = color,
        }
    }

    pub fn color(&self, target: ColorTarget) -> &Color {
        match target {
            ColorTarget::Misspelled => &self.draft.misspelled_color,
            ColorTarget::Grammar => &self.draft.grammar_color,
        }
    }

    /// Run the color picker for `target`. A cancelled picker keeps the old color.
    pub async fn choose_color<F: Frontend + ?Sized>(
        &mut self,
        target: ColorTarget,
        frontend: &mut F,
    ) -> bool {
        let current = self.color(target).clone();
        match frontend.pick_color(&current).await {
            Some(color) => {
                self.set_color(target, color);
                true
            }
            None => false,
        }
    }

    pub async fn choose_misspelled_color<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> bool {
        self.choose_color(ColorTarget::Misspelled, frontend).await
    }

    pub async fn choose_grammar_color<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> bool {
        self.choose_color(ColorTarget::Grammar, frontend).await
    }

    /// Commit the draft to the live settings, persist, then notify.
    pub fn apply(self, store: &mut SettingsStore, on_apply: impl FnOnce(&Settings)) {
        store.replace(self.draft);
        if let Err(e) = store.persist() {
            log::warn!("Failed to persist settings: {}", e);
        }
        on_apply(store.settings());
    }

    /// Discard the draft.
    pub fn close(self) {}
}
