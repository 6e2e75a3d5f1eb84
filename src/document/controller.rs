//! File operations with the unsaved-changes guard.

use std::path::{Path, PathBuf};

use super::{Document, read_document, write_document};
use crate::ui::{DOCUMENT_FILTERS, Frontend, UnsavedChoice};

pub const DEFAULT_EXTENSION: &str = "txt";

/// How a user-triggered file action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    Failed,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Outcome::Completed
    }
}

/// Owns the document and runs New/Open/Save/Save-As/autosave against it.
#[derive(Debug, Default)]
pub struct DocumentController {
    document: Document,
}

impl DocumentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Clear the buffer and path after the unsaved-changes guard.
    pub async fn new_file<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Outcome {
        if !self.confirm_discard(frontend).await {
            return Outcome::Cancelled;
        }
        self.document.clear();
        log::info!("Started a new document");
        Outcome::Completed
    }

    /// Pick a file and load it after the unsaved-changes guard.
    pub async fn open_file<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Outcome {
        if !self.confirm_discard(frontend).await {
            return Outcome::Cancelled;
        }
        let Some(path) = frontend.pick_open_path(DOCUMENT_FILTERS).await else {
            return Outcome::Cancelled;
        };
        self.open_path(&path, frontend).await
    }

    /// Load `path` into the buffer. On failure the buffer is left as it was.
    pub async fn open_path<F: Frontend + ?Sized>(
        &mut self,
        path: &Path,
        frontend: &mut F,
    ) -> Outcome {
        match read_document(path).await {
            Ok(content) => {
                log::info!("Opened {} ({} bytes)", path.display(), content.len());
                self.document.load(path.to_path_buf(), content);
                Outcome::Completed
            }
            Err(e) => {
                log::warn!("Open failed: {}", e);
                frontend.show_error("Open", &e.to_string());
                Outcome::Failed
            }
        }
    }

    /// Write to the current path, or fall through to Save-As without one.
    pub async fn save<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Outcome {
        match self.document.path().map(Path::to_path_buf) {
            Some(path) => self.write_to(path, frontend).await,
            None => self.save_as(frontend).await,
        }
    }

    /// Pick a path, adopt it, and save there.
    pub async fn save_as<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Outcome {
        let Some(path) = frontend
            .pick_save_path(DEFAULT_EXTENSION, DOCUMENT_FILTERS)
            .await
        else {
            return Outcome::Cancelled;
        };
        self.write_to(with_default_extension(path), frontend).await
    }

    /// Write the buffer if autosave is on and a path is set. Failures are
    /// logged and otherwise ignored. Returns true if the file was written.
    pub async fn autosave(&mut self, enabled: bool) -> bool {
        if !enabled {
            return false;
        }
        let Some(path) = self.document.path().map(Path::to_path_buf) else {
            return false;
        };

        match write_document(&path, self.document.text()).await {
            Ok(()) => {
                log::debug!("Autosaved {}", path.display());
                self.document.mark_saved();
                true
            }
            Err(e) => {
                log::warn!("Autosave failed: {}", e);
                false
            }
        }
    }

    /// Save to `path` and make it the document path. A failed write keeps
    /// the previous path.
    async fn write_to<F: Frontend + ?Sized>(
        &mut self,
        path: PathBuf,
        frontend: &mut F,
    ) -> Outcome {
        match write_document(&path, self.document.text()).await {
            Ok(()) => {
                log::info!("Saved {}", path.display());
                self.document.set_path(Some(path));
                self.document.mark_saved();
                frontend.show_info("Save", "File saved successfully!");
                Outcome::Completed
            }
            Err(e) => {
                log::warn!("Save failed: {}", e);
                frontend.show_error("Save", &e.to_string());
                Outcome::Failed
            }
        }
    }

    /// Returns true when the caller may throw the buffer away.
    async fn confirm_discard<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> bool {
        if !self.document.is_modified() {
            return true;
        }
        match frontend.confirm_unsaved().await {
            UnsavedChoice::Save => self.save(frontend).await.is_completed(),
            UnsavedChoice::Discard => true,
            UnsavedChoice::Cancel => false,
        }
    }
}

fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}
