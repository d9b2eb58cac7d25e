//! Calendar: "now", timezone resolution and calendar dates
//!
//! Every date the scheduler reasons about is resolved in one configured
//! timezone. Future and past checks compare calendar days in that timezone;
//! note identity is compared through formatted labels only.

pub mod pattern;

use crate::error::ApiError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tracing::warn;

/// Value of the timezone setting that asks for the host timezone.
pub const AUTO_TIMEZONE: &str = "auto";

/// Resolve a configured timezone name, or detect the host timezone for `auto`.
pub fn resolve_timezone(name: &str) -> Result<Tz, ApiError> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case(AUTO_TIMEZONE) {
        return Ok(detect_local_timezone());
    }
    name.parse::<Tz>()
        .map_err(|_| ApiError::InvalidTimezone(name.to_string()))
}

/// Host timezone via the platform's IANA name; UTC when it cannot be determined.
pub fn detect_local_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(tz = %name, "Unrecognised host timezone, falling back to UTC");
            chrono_tz::UTC
        }),
        Err(e) => {
            warn!(error = %e, "Could not detect host timezone, falling back to UTC");
            chrono_tz::UTC
        }
    }
}

/// An instant resolved in the configured timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    instant: DateTime<Tz>,
}

impl CalendarDate {
    pub fn from_instant(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }

    pub fn instant(&self) -> &DateTime<Tz> {
        &self.instant
    }

    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    /// Month, 1-12
    pub fn month(&self) -> u32 {
        self.instant.month()
    }

    pub fn day(&self) -> u32 {
        self.instant.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.instant.weekday()
    }

    /// The calendar day this instant falls on in its timezone.
    pub fn naive_date(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    /// Format with a moment-style pattern.
    pub fn format(&self, pattern: &str) -> String {
        pattern::render(pattern, &self.instant)
    }

    /// Same calendar identity source, different instant.
    pub fn shifted(&self, by: Duration) -> Self {
        Self {
            instant: self.instant + by,
        }
    }
}

/// "Now" in a fixed timezone, plus date construction helpers.
#[derive(Debug, Clone)]
pub struct Calendar {
    now: DateTime<Tz>,
}

impl Calendar {
    /// Calendar anchored at the current system time.
    pub fn new(tz: Tz) -> Self {
        Self::at(Utc::now(), tz)
    }

    /// Calendar anchored at a fixed instant.
    pub fn at(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            now: now.with_timezone(&tz),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.now.timezone()
    }

    pub fn now(&self) -> CalendarDate {
        CalendarDate::from_instant(self.now)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn current_year(&self) -> i32 {
        self.now.year()
    }

    pub fn current_month(&self) -> u32 {
        self.now.month()
    }

    /// Local midnight of (year, month, day), or `None` for an invalid date.
    ///
    /// When midnight falls in a DST gap the first valid instant of that
    /// day is used instead.
    pub fn date(&self, year: i32, month: u32, day: u32) -> Option<CalendarDate> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let tz = self.timezone();
        let instant = (0..24).find_map(|hour| {
            let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
            tz.from_local_datetime(&date.and_time(time)).earliest()
        })?;
        Some(CalendarDate::from_instant(instant))
    }

    /// Strictly after today, compared by calendar day.
    pub fn is_future(&self, date: &CalendarDate) -> bool {
        date.naive_date() > self.today()
    }

    /// Strictly before today, compared by calendar day.
    pub fn is_past(&self, date: &CalendarDate) -> bool {
        date.naive_date() < self.today()
    }

    pub fn is_today(&self, date: &CalendarDate) -> bool {
        date.naive_date() == self.today()
    }
}

/// Number of days in the given month, 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 0,
    }
}
