//! Sources of the document text.
//!
//! Readers never open files on their own. Instead, a [`TextSource`] is passed to the call that needs one,
//! e.g. [`GmlProvider::populate_from`](crate::gml::GmlProvider::populate_from).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::GeoTextError;

/// Loads text documents by key.
pub trait TextSource {
    /// Returns the text of the document with the given key.
    fn load(&self, key: &str) -> Result<String, GeoTextError>;
}

/// Reads documents from files in a folder. Keys are file paths relative to the folder.
#[derive(Debug, Clone)]
pub struct FileSource {
    folder_path: PathBuf,
}

impl FileSource {
    /// Creates a new source rooted at the given folder.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            folder_path: path.as_ref().into(),
        }
    }

    /// Path of the file for the given key.
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.folder_path.join(key)
    }
}

impl TextSource for FileSource {
    fn load(&self, key: &str) -> Result<String, GeoTextError> {
        let file_path = self.file_path(key);
        debug!("Loading {key} from file {file_path:?}");
        let text = std::fs::read_to_string(&file_path)?;
        debug!("Loaded {} bytes from {file_path:?}", text.len());

        Ok(text)
    }
}

/// Keeps documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, replacing the previous one with the same key.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(key.into(), text.into());
    }

    /// Builder-style variant of [`MemorySource::insert`].
    pub fn with_document(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }
}

impl TextSource for MemorySource {
    fn load(&self, key: &str) -> Result<String, GeoTextError> {
        self.documents
            .get(key)
            .cloned()
            .ok_or(GeoTextError::NotFound)
    }
}
