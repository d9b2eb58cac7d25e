//! Daily period iterator

use crate::calendar::{days_in_month, Calendar};
use crate::config::PeriodicConfig;
use crate::error::GenerationError;
use crate::generation::{creation_timestamp, Cadence, PlannedNote};
use crate::index::{ArtifactIndex, ExistingArtifacts};
use crate::layout::NoteLayout;
use crate::store::{normalize_store_path, ArtifactEntry, DocumentStore};
use tracing::debug;

/// Planned daily notes for one month, with the listing they were planned from.
#[derive(Debug, Clone)]
pub struct MonthPlan {
    pub month: u32,
    pub folder: String,
    /// Notes inside `folder` at planning time
    pub listing: Vec<ArtifactEntry>,
    pub notes: Vec<PlannedNote>,
}

/// Walks the months of the current year, listing the store once per month
/// that the policy admits.
pub struct DailyPeriods<'a> {
    config: &'a PeriodicConfig,
    calendar: &'a Calendar,
    store: &'a dyn DocumentStore,
    next_month: u32,
}

impl<'a> DailyPeriods<'a> {
    pub fn new(config: &'a PeriodicConfig, calendar: &'a Calendar, store: &'a dyn DocumentStore) -> Self {
        Self {
            config,
            calendar,
            store,
            next_month: 1,
        }
    }
}

impl<'a> Iterator for DailyPeriods<'a> {
    type Item = Result<MonthPlan, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let layout = NoteLayout::new(self.config);
        let policy = self.config.daily.backfill;
        let year = self.calendar.current_year();
        let current_label = layout.month_label(&self.calendar.now());

        while self.next_month <= self.calendar.current_month() {
            let month = self.next_month;
            self.next_month += 1;

            let Some(first) = self.calendar.date(year, month, 1) else {
                continue;
            };
            let month_label = layout.month_label(&first);
            if !policy.should_consider(&month_label, &current_label, false) {
                debug!(month = %month_label, policy = %policy, "Month outside backfill window");
                continue;
            }

            let folder = layout.daily_folder(&first);
            let listing = match self.store.list_artifacts() {
                Ok(listing) => scope_listing(listing, &folder),
                Err(e) => {
                    self.next_month = 13;
                    return Some(Err(GenerationError::ListingFailed(e)));
                }
            };
            let existing = ExistingArtifacts::scoped(&listing, &folder, None, layout.separator());
            let notes = plan_month_days(self.config, self.calendar, month, &existing);

            return Some(Ok(MonthPlan {
                month,
                folder,
                listing,
                notes,
            }));
        }

        None
    }
}

fn scope_listing(listing: Vec<ArtifactEntry>, folder: &str) -> Vec<ArtifactEntry> {
    let prefix = format!("{}/", normalize_store_path(folder));
    listing
        .into_iter()
        .filter(|entry| prefix == "/" || entry.path.starts_with(&prefix))
        .collect()
}

/// Days of `month` (current year) that need a daily note, in order.
pub fn plan_month_days(
    config: &PeriodicConfig,
    calendar: &Calendar,
    month: u32,
    existing: &dyn ArtifactIndex,
) -> Vec<PlannedNote> {
    let layout = NoteLayout::new(config);
    let policy = config.daily.backfill;
    let year = calendar.current_year();
    let mut notes = Vec::new();

    for day in 1..=days_in_month(year, month) {
        let Some(date) = calendar.date(year, month, day) else {
            continue;
        };
        if calendar.is_future(&date) {
            break;
        }

        let label = layout.day_label(&date);
        if existing.exists(&label) {
            debug!(label = %label, month, "Daily note exists");
            continue;
        }
        if !policy.fills_past_days() && calendar.is_past(&date) {
            continue;
        }

        notes.push(PlannedNote {
            cadence: Cadence::Daily,
            created_at: creation_timestamp(calendar, &date, config.schedule.prefer_latest),
            path: layout.daily_note_path(&date),
            label,
            date,
        });
    }

    notes
}
