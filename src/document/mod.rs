//! Document Controller
//!
//! The single open buffer, its file path, and the file operations behind
//! the File menu.

pub mod autosave;
pub mod controller;

use std::ops::Range;
use std::path::{Path, PathBuf};

pub use autosave::{AUTOSAVE_INTERVAL, AutosaveTick, spawn_autosave_timer};
pub use controller::{DocumentController, Outcome};

pub const APP_TITLE: &str = "Vertex Ideas";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("offset {offset} is not a character boundary in a {len}-byte buffer")]
    InvalidOffset { offset: usize, len: usize },
}

/// Where the document stands relative to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentState {
    Untitled,
    Open(PathBuf),
    Modified,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    buffer: String,
    modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn state(&self) -> DocumentState {
        match (&self.path, self.modified) {
            (_, true) => DocumentState::Modified,
            (Some(path), false) => DocumentState::Open(path.clone()),
            (None, false) => DocumentState::Untitled,
        }
    }

    /// Window title for the current file.
    pub fn title(&self) -> String {
        match self.path.as_deref().and_then(Path::file_name) {
            Some(name) => format!("{} - {}", APP_TITLE, name.to_string_lossy()),
            None => format!("{} - New File", APP_TITLE),
        }
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        self.check_offset(offset)?;
        self.buffer.insert_str(offset, text);
        self.modified = true;
        Ok(())
    }

    pub fn delete(&mut self, range: Range<usize>) -> Result<(), DocumentError> {
        self.check_offset(range.start)?;
        self.check_offset(range.end)?;
        if range.start > range.end {
            return Err(DocumentError::InvalidOffset {
                offset: range.start,
                len: self.buffer.len(),
            });
        }
        self.buffer.replace_range(range, "");
        self.modified = true;
        Ok(())
    }

    pub fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.modified = true;
    }

    /// Replace the whole buffer as an edit.
    pub fn set_text(&mut self, text: String) {
        self.buffer = text;
        self.modified = true;
    }

    /// Reset to an empty untitled buffer.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    /// Replace the buffer with freshly loaded file contents.
    pub(crate) fn load(&mut self, path: PathBuf, content: String) {
        self.path = Some(path);
        self.buffer = content;
        self.modified = false;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.modified = false;
    }

    fn check_offset(&self, offset: usize) -> Result<(), DocumentError> {
        if offset <= self.buffer.len() && self.buffer.is_char_boundary(offset) {
            Ok(())
        } else {
            Err(DocumentError::InvalidOffset {
                offset,
                len: self.buffer.len(),
            })
        }
    }
}

/// Read a document file as UTF-8.
pub async fn read_document(path: &Path) -> Result<String, DocumentError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    String::from_utf8(bytes).map_err(|source| DocumentError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `text` verbatim, overwriting the file.
pub async fn write_document(path: &Path, text: &str) -> Result<(), DocumentError> {
    tokio::fs::write(path, text.as_bytes())
        .await
        .map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
}
