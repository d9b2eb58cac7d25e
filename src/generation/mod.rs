//! Period iterators: which daily and monthly notes are due.
//!
//! Planning is pure over a listing snapshot. The daily iterator lists the
//! store once per month, lazily, so notes created for one month are visible
//! when the next month is planned.

pub mod daily;
pub mod monthly;

pub use daily::{plan_month_days, DailyPeriods, MonthPlan};
pub use monthly::plan_monthly;

use crate::calendar::{Calendar, CalendarDate};
use chrono::Duration;
use serde::Serialize;
use std::fmt;

/// Note cadences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Monthly,
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily => f.write_str("daily"),
            Cadence::Monthly => f.write_str("monthly"),
        }
    }
}

/// A period that needs a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedNote {
    pub cadence: Cadence,
    /// Calendar identity of the period
    pub date: CalendarDate,
    /// Instant substituted for the date token
    pub created_at: CalendarDate,
    /// Root-relative note path
    pub path: String,
    pub label: String,
}

/// Timestamp for the date token of a period's note.
///
/// Today's note is stamped with "now", one minute later under prefer-latest;
/// past periods are stamped with their own date.
pub fn creation_timestamp(calendar: &Calendar, date: &CalendarDate, prefer_latest: bool) -> CalendarDate {
    if !calendar.is_today(date) {
        return date.clone();
    }
    let now = calendar.now();
    if prefer_latest {
        now.shifted(Duration::minutes(1))
    } else {
        now
    }
}
