//! Monthly period iterator

use crate::calendar::{days_in_month, Calendar};
use crate::config::PeriodicConfig;
use crate::generation::{creation_timestamp, Cadence, PlannedNote};
use crate::index::{ArtifactIndex, ExistingArtifacts};
use crate::layout::NoteLayout;
use crate::store::ArtifactEntry;
use tracing::debug;

/// Months of the current year that need a monthly note, in order.
///
/// A month's note is due on its configured day; in the current month it is
/// not created before that day arrives.
pub fn plan_monthly(config: &PeriodicConfig, calendar: &Calendar, listing: &[ArtifactEntry]) -> Vec<PlannedNote> {
    let layout = NoteLayout::new(config);
    let policy = config.monthly.backfill;
    let year = calendar.current_year();
    let now = calendar.now();
    let current_label = layout.month_label(&now);

    let monthly_folder = layout.monthly_folder_name();
    let existing = ExistingArtifacts::scoped(
        listing,
        &layout.year_folder(&now),
        Some(monthly_folder.as_str()),
        layout.separator(),
    );

    let mut notes = Vec::new();
    for month in 1..=calendar.current_month() {
        let day = config
            .monthly
            .day_of_month
            .clamp(1, days_in_month(year, month).max(1));
        let Some(date) = calendar.date(year, month, day) else {
            continue;
        };

        let label = layout.month_label(&date);
        if !policy.should_consider(&label, &current_label, calendar.is_future(&date)) {
            debug!(month = %label, policy = %policy, "Monthly note not due");
            continue;
        }
        if existing.exists(&label) {
            debug!(month = %label, "Monthly note exists");
            continue;
        }

        notes.push(PlannedNote {
            cadence: Cadence::Monthly,
            created_at: creation_timestamp(calendar, &date, config.schedule.prefer_latest),
            path: layout.monthly_note_path(&date),
            label,
            date,
        });
    }

    notes
}
