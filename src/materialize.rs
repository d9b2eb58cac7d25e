//! File Materializer
//!
//! Turns one planned period into a note: cascade-create its folders, re-check
//! that no note for the period appeared, render the template and create the
//! file without ever overwriting.

use crate::calendar::CalendarDate;
use crate::config::PeriodicConfig;
use crate::error::{GenerationError, StoreError};
use crate::index::{ArtifactIndex, ExistingArtifacts};
use crate::layout::NoteLayout;
use crate::notify::Notifier;
use crate::store::path::{base_name, split_parent};
use crate::store::{normalize_store_path, with_note_extension, ArtifactEntry, DocumentStore};
use crate::template::{render_note, VariableExpander};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What happened to a materialization request that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterializeStatus {
    Created,
    /// A note for the period was already present; nothing was written.
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Materialized {
    pub path: String,
    pub status: MaterializeStatus,
    /// Folder steps that failed during the cascade (already reported)
    pub folder_failures: Vec<String>,
}

/// Creates notes in a store.
pub struct Materializer<'a> {
    store: &'a dyn DocumentStore,
    expander: &'a dyn VariableExpander,
    notifier: &'a dyn Notifier,
    config: &'a PeriodicConfig,
}

impl<'a> Materializer<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        expander: &'a dyn VariableExpander,
        notifier: &'a dyn Notifier,
        config: &'a PeriodicConfig,
    ) -> Self {
        Self {
            store,
            expander,
            notifier,
            config,
        }
    }

    /// Materialize `target_path` from `template`.
    ///
    /// `listing` is the snapshot the caller planned from; it is checked again
    /// here for a note carrying the same period label.
    pub fn materialize(
        &self,
        created_at: &CalendarDate,
        target_path: &str,
        template: &str,
        listing: &[ArtifactEntry],
    ) -> Result<Materialized, GenerationError> {
        let path = with_note_extension(&normalize_store_path(target_path));
        let (folder, file_name) = split_parent(&path);

        let folder_failures = self.ensure_folders(folder);

        let layout = NoteLayout::new(self.config);
        let label = layout.label_of_path(&path);
        let existing = ExistingArtifacts::scoped(listing, folder, None, layout.separator());
        if existing.exists(&label) || self.store.exists(&path) {
            debug!(path = %path, label = %label, "Note already exists, skipping");
            return Ok(Materialized {
                path,
                status: MaterializeStatus::AlreadyExists,
                folder_failures,
            });
        }

        let content = render_note(
            template,
            &self.config.date_token.token,
            &self.config.date_token.format,
            created_at,
            base_name(file_name),
            self.expander,
        );

        match self.store.create_artifact(&path, &content) {
            Ok(()) => {
                info!(path = %path, "Created note");
                Ok(Materialized {
                    path,
                    status: MaterializeStatus::Created,
                    folder_failures,
                })
            }
            Err(StoreError::AlreadyExists(_)) => {
                debug!(path = %path, "Note appeared before creation, skipping");
                Ok(Materialized {
                    path,
                    status: MaterializeStatus::AlreadyExists,
                    folder_failures,
                })
            }
            Err(source) => Err(GenerationError::ArtifactCreationFailed { path, source }),
        }
    }

    /// Create each missing ancestor of `folder`, root first. A failing step is
    /// reported and the remaining steps are still attempted.
    fn ensure_folders(&self, folder: &str) -> Vec<String> {
        let mut failures = Vec::new();
        let mut prefix = String::new();

        for segment in folder.split('/').filter(|s| !s.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);

            if self.store.exists(&prefix) {
                continue;
            }
            match self.store.create_folder(&prefix) {
                Ok(()) => debug!(folder = %prefix, "Created folder"),
                Err(StoreError::AlreadyExists(_)) => {}
                Err(source) => {
                    let err = GenerationError::FolderCreationFailed {
                        path: prefix.clone(),
                        source,
                    };
                    warn!(folder = %prefix, error = %err, "Folder creation failed");
                    self.notifier
                        .notify(&err.to_string(), self.config.notifications.debug_only_failures);
                    failures.push(err.to_string());
                }
            }
        }

        failures
    }
}
