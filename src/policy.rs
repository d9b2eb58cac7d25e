//! Backfill policy and the per-period decision it drives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far into the past missing notes are filled in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackfillPolicy {
    /// Only the current period; past gaps are never filled.
    #[default]
    None,
    /// Only periods inside the current month.
    Month,
    /// Every period of the current year up to today.
    Year,
}

impl fmt::Display for BackfillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackfillPolicy::None => "none",
            BackfillPolicy::Month => "month",
            BackfillPolicy::Year => "year",
        };
        f.write_str(name)
    }
}

impl BackfillPolicy {
    /// Whether a candidate period is considered for creation at all.
    ///
    /// Labels are formatted with the same pattern; `none` and `month` only
    /// admit the current period's label. Days before today under `none` are
    /// rejected by the daily iterator, which owns the day-level comparison.
    pub fn should_consider(self, candidate_label: &str, current_label: &str, is_future: bool) -> bool {
        if is_future {
            return false;
        }
        match self {
            BackfillPolicy::None | BackfillPolicy::Month => candidate_label == current_label,
            BackfillPolicy::Year => true,
        }
    }

    /// False when only today's period may be created.
    pub fn fills_past_days(self) -> bool {
        !matches!(self, BackfillPolicy::None)
    }
}
