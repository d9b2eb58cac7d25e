//! Existing-Artifact Index
//!
//! Answers "is there already a note for this period?" from a store listing.
//! A note's identity is its period label: the part of its base name before
//! the first separator, trimmed. `15 - Friday` and `15 - Fri (holiday)` both
//! carry label `15`. Labels are compared as plain strings, so changing the
//! day or month pattern between runs stops old notes from matching.

use crate::store::{normalize_store_path, ArtifactEntry};
use std::collections::HashSet;

/// Extract the period label from a base name.
pub fn period_label(base_name: &str, separator: char) -> &str {
    base_name
        .split_once(separator)
        .map(|(head, _)| head)
        .unwrap_or(base_name)
        .trim()
}

/// Membership test for period labels within one folder scope.
pub trait ArtifactIndex {
    fn exists(&self, label: &str) -> bool;
}

/// Label index built from a listing snapshot.
#[derive(Debug, Clone, Default)]
pub struct ExistingArtifacts {
    labels: HashSet<String>,
}

impl ExistingArtifacts {
    /// Index the notes inside `folder`.
    ///
    /// With `parent_filter`, a note whose parent folder name is known must sit
    /// directly in a folder of that name; notes with no known parent pass.
    pub fn scoped(
        listing: &[ArtifactEntry],
        folder: &str,
        parent_filter: Option<&str>,
        separator: char,
    ) -> Self {
        let folder = normalize_store_path(folder);
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{}/", folder)
        };

        let labels = listing
            .iter()
            .filter(|entry| normalize_store_path(&entry.path).starts_with(&prefix))
            .filter(|entry| match (parent_filter, entry.parent_name.as_deref()) {
                (Some(expected), Some(parent)) => parent == expected,
                _ => true,
            })
            .map(|entry| period_label(&entry.base_name, separator).to_string())
            .collect();

        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl ArtifactIndex for ExistingArtifacts {
    fn exists(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}
