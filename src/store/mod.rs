//! Document Store
//!
//! The narrow interface the scheduler needs from the vault: list notes, read a
//! template, create folders and create notes without ever overwriting. The
//! listing is the only record of which periods already have a note.

pub mod fs;
pub mod path;

pub use fs::FsStore;
pub use path::{has_extension, join_store_path, normalize_store_path, with_note_extension};

use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// One note in the store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Root-relative path including extension, `/` separated
    pub path: String,
    /// File name without extension
    pub base_name: String,
    /// Name of the immediate parent folder, when the store knows it
    pub parent_name: Option<String>,
}

impl ArtifactEntry {
    /// Build an entry from a normalized root-relative path.
    pub fn from_path(path: &str) -> Self {
        let path = normalize_store_path(path);
        let (parent, file_name) = path::split_parent(&path);
        let parent_name = path::split_parent(parent).1;
        Self {
            base_name: path::base_name(file_name).to_string(),
            parent_name: if parent_name.is_empty() {
                None
            } else {
                Some(parent_name.to_string())
            },
            path,
        }
    }
}

/// Result of reading a path from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLookup {
    Found(String),
    Folder,
    NotFound,
}

/// Document store interface
pub trait DocumentStore {
    /// All notes in the store, sorted by path.
    fn list_artifacts(&self) -> Result<Vec<ArtifactEntry>, StoreError>;

    fn read_artifact(&self, path: &str) -> Result<ArtifactLookup, StoreError>;

    /// Create a single folder; its parent must already exist.
    fn create_folder(&self, path: &str) -> Result<(), StoreError>;

    /// Create a note. Fails with `StoreError::AlreadyExists` rather than
    /// overwriting.
    fn create_artifact(&self, path: &str, content: &str) -> Result<(), StoreError>;

    fn exists(&self, path: &str) -> bool;
}
