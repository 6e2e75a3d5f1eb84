//! Vertex Ideas
//!
//! A single-buffer text editor that annotates what you type.
//!
//! This library provides:
//! - Settings with a flat TOML config file
//! - Syntax highlighting and spelling/grammar annotations
//! - The right-click suggestion menu
//! - File operations with an unsaved-changes guard and autosave
//! - A line-oriented terminal window

pub mod annotate;
pub mod config;
pub mod dictionary;
pub mod document;
pub mod editor;
pub mod preferences;
pub mod settings;
pub mod suggest;
pub mod ui;

pub use annotate::{AnnotationEngine, Annotations, Span, SpanKind};
pub use config::Config;
pub use dictionary::{Dictionary, WordListDictionary};
pub use document::{Document, DocumentController, DocumentError};
pub use editor::{Action, Editor, run_session};
pub use settings::{Settings, SettingsStore};
pub use ui::{Frontend, TerminalFrontend};
