//! Settings Store
//!
//! In-memory editor options mirrored to a flat `[Settings]` table on disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::color::{Color, ColorError};

/// Name of the only table written to the config file.
pub const SETTINGS_GROUP: &str = "Settings";

pub const FONT_SIZE_MIN: u8 = 8;
pub const FONT_SIZE_MAX: u8 = 32;
pub const DEFAULT_FONT_SIZE: u8 = 12;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for setting '{key}'")]
    InvalidValue { key: SettingKey, value: String },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("failed to write settings to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Keys of the `[Settings]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    AutosaveEnabled,
    SpellcheckEnabled,
    FontSize,
    MisspelledColor,
    GrammarColor,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::AutosaveEnabled,
        SettingKey::SpellcheckEnabled,
        SettingKey::FontSize,
        SettingKey::MisspelledColor,
        SettingKey::GrammarColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::AutosaveEnabled => "autosave_enabled",
            SettingKey::SpellcheckEnabled => "spellcheck_enabled",
            SettingKey::FontSize => "font_size",
            SettingKey::MisspelledColor => "misspelled_color",
            SettingKey::GrammarColor => "grammar_color",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}

/// Editor options.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub autosave_enabled: bool,
    pub spellcheck_enabled: bool,
    pub font_size: u8,
    pub misspelled_color: Color,
    pub grammar_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autosave_enabled: true,
            spellcheck_enabled: true,
            font_size: DEFAULT_FONT_SIZE,
            misspelled_color: Color::from_parts("red", [0xff, 0x00, 0x00]),
            grammar_color: Color::from_parts("blue", [0x00, 0x00, 0xff]),
        }
    }
}

impl Settings {
    /// String representation of a single option, as written to disk.
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::AutosaveEnabled => self.autosave_enabled.to_string(),
            SettingKey::SpellcheckEnabled => self.spellcheck_enabled.to_string(),
            SettingKey::FontSize => self.font_size.to_string(),
            SettingKey::MisspelledColor => self.misspelled_color.to_string(),
            SettingKey::GrammarColor => self.grammar_color.to_string(),
        }
    }

    /// Parse and store a single option. Font sizes are clamped into range.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key,
            value: value.to_string(),
        };

        match key {
            SettingKey::AutosaveEnabled => {
                self.autosave_enabled = parse_bool(value).ok_or_else(invalid)?;
            }
            SettingKey::SpellcheckEnabled => {
                self.spellcheck_enabled = parse_bool(value).ok_or_else(invalid)?;
            }
            SettingKey::FontSize => {
                let size: i64 = value.trim().parse().map_err(|_| invalid())?;
                self.font_size = clamp_font_size(size);
            }
            SettingKey::MisspelledColor => self.misspelled_color = value.parse()?,
            SettingKey::GrammarColor => self.grammar_color = value.parse()?,
        }

        Ok(())
    }
}

/// Clamp a requested font size into `FONT_SIZE_MIN..=FONT_SIZE_MAX`.
pub fn clamp_font_size(size: i64) -> u8 {
    size.clamp(FONT_SIZE_MIN as i64, FONT_SIZE_MAX as i64) as u8
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Settings bound to the file they persist to.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// A store holding defaults, without touching the disk.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// Load settings from `path`. Anything missing or malformed keeps its default.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = read_settings_file(&path);
        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get(&self, key: SettingKey) -> String {
        self.settings.get(key)
    }

    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        self.settings.set(key, value)
    }

    /// Replace every option at once.
    pub fn replace(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Rewrite the whole config file from the in-memory settings.
    pub fn persist(&self) -> Result<(), SettingsError> {
        let mut group = toml::Table::new();
        for key in SettingKey::ALL {
            group.insert(
                key.as_str().to_string(),
                toml::Value::String(self.settings.get(key)),
            );
        }
        let mut root = toml::Table::new();
        root.insert(SETTINGS_GROUP.to_string(), toml::Value::Table(group));

        let content = toml::to_string(&root)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, content).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

fn read_settings_file(path: &Path) -> Settings {
    let mut settings = Settings::default();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("No settings read from {}: {}", path.display(), e);
            return settings;
        }
    };

    let root: toml::Table = match toml::from_str(&content) {
        Ok(root) => root,
        Err(e) => {
            log::warn!(
                "Malformed settings file {}, using defaults: {}",
                path.display(),
                e
            );
            return settings;
        }
    };

    let Some(group) = root.get(SETTINGS_GROUP).and_then(|v| v.as_table()) else {
        log::warn!(
            "Settings file {} has no [{}] table, using defaults",
            path.display(),
            SETTINGS_GROUP
        );
        return settings;
    };

    for (name, value) in group {
        let key = match name.parse::<SettingKey>() {
            Ok(key) => key,
            Err(_) => {
                log::debug!("Ignoring unknown setting '{}'", name);
                continue;
            }
        };
        let text = match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Integer(i) => i.to_string(),
            other => {
                log::warn!("Ignoring setting '{}' with unsupported value {}", name, other);
                continue;
            }
        };
        if let Err(e) = settings.set(key, &text) {
            log::warn!("Ignoring setting from {}: {}", path.display(), e);
        }
    }

    settings
}
