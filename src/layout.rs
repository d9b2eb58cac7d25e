//! Note layout: where a period's note lives and what its label is.
//!
//! Daily notes: `<root>/<year>/<month>/<day>.md`.
//! Monthly notes: `<root>/<year>/<monthly folder>/<month>.md`.

use crate::calendar::CalendarDate;
use crate::config::PeriodicConfig;
use crate::index::period_label;
use crate::store::path::{base_name, split_parent};
use crate::store::{join_store_path, normalize_store_path, with_note_extension};

/// Path and label derivation over a config snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NoteLayout<'a> {
    config: &'a PeriodicConfig,
}

impl<'a> NoteLayout<'a> {
    pub fn new(config: &'a PeriodicConfig) -> Self {
        Self { config }
    }

    pub fn separator(&self) -> char {
        self.config.formats.separator_char()
    }

    pub fn year_folder(&self, date: &CalendarDate) -> String {
        join_store_path([
            self.config.root_folder.as_str(),
            date.format(&self.config.formats.year).as_str(),
        ])
    }

    /// Folder holding the daily notes of the date's month.
    pub fn daily_folder(&self, date: &CalendarDate) -> String {
        join_store_path([
            self.year_folder(date),
            date.format(&self.config.formats.month),
        ])
    }

    pub fn daily_note_path(&self, date: &CalendarDate) -> String {
        with_note_extension(&join_store_path([
            self.daily_folder(date),
            date.format(&self.config.formats.day),
        ]))
    }

    /// Folder holding the monthly notes of the date's year.
    pub fn monthly_folder(&self, date: &CalendarDate) -> String {
        join_store_path([self.year_folder(date), self.config.monthly.folder.clone()])
    }

    /// Name of the folder that directly holds monthly notes, as it appears
    /// in note paths.
    pub fn monthly_folder_name(&self) -> String {
        let folder = normalize_store_path(&self.config.monthly.folder);
        split_parent(&folder).1.to_string()
    }

    pub fn monthly_note_path(&self, date: &CalendarDate) -> String {
        with_note_extension(&join_store_path([
            self.monthly_folder(date),
            date.format(&self.config.formats.month),
        ]))
    }

    /// Label of the date's day, as it appears in daily note names.
    pub fn day_label(&self, date: &CalendarDate) -> String {
        self.label_of_path(&self.daily_note_path(date))
    }

    /// Label of the date's month, as it appears in month folder and monthly
    /// note names.
    pub fn month_label(&self, date: &CalendarDate) -> String {
        self.label_of_path(&self.monthly_note_path(date))
    }

    /// Label carried by the file name of a note path.
    pub fn label_of_path(&self, path: &str) -> String {
        let (_, file_name) = split_parent(path);
        period_label(base_name(file_name), self.separator()).to_string()
    }
}
