//! Filesystem-backed document store rooted at a vault directory

use crate::error::StoreError;
use crate::store::path::{ensure_contained, normalize_store_path, NOTE_EXTENSION};
use crate::store::{ArtifactEntry, ArtifactLookup, DocumentStore};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Vault directory on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a vault; the directory must already exist.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let root = dunce::canonicalize(root)
            .map_err(|e| StoreError::io(root.display().to_string(), e))?;
        if !root.is_dir() {
            return Err(StoreError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let normalized = normalize_store_path(path);
        ensure_contained(&normalized)?;
        Ok(normalized
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Some(normalize_store_path(&joined))
    }
}

/// Dot-prefixed entries (`.obsidian`, `.git`, `.trash`) are never notes.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn is_note(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(NOTE_EXTENSION))
        .unwrap_or(false)
}

impl DocumentStore for FsStore {
    fn list_artifacts(&self) -> Result<Vec<ArtifactEntry>, StoreError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| self.root.display().to_string());
                StoreError::io(
                    path,
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(ErrorKind::Other, "walk failed")),
                )
            })?;

            if !entry.file_type().is_file() || !is_note(entry.path()) {
                continue;
            }
            if let Some(relative) = self.relative(entry.path()) {
                entries.push(ArtifactEntry::from_path(&relative));
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(root = %self.root.display(), count = entries.len(), "Listed notes");
        Ok(entries)
    }

    fn read_artifact(&self, path: &str) -> Result<ArtifactLookup, StoreError> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Ok(ArtifactLookup::Folder);
        }
        match fs::read_to_string(&full) {
            Ok(content) => Ok(ArtifactLookup::Found(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ArtifactLookup::NotFound),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        match fs::create_dir(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(path.to_string()))
            }
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn create_artifact(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_string()),
                _ => StoreError::io(path, e),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| StoreError::io(path, e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|full| full.exists()).unwrap_or(false)
    }
}
