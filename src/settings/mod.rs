//! Editor Settings
//!
//! Typed options, their colors, and the flat config file they persist to.

pub mod color;
pub mod store;

pub use color::{Color, ColorError};
pub use store::{
    FONT_SIZE_MAX, FONT_SIZE_MIN, SettingKey, Settings, SettingsError, SettingsStore,
    clamp_font_size,
};
