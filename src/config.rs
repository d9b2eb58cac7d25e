//! Configuration System
//!
//! Layered configuration for the scheduler: built-in defaults, the user's
//! global file, the vault's own files and finally environment variables. The
//! loaded `PeriodicConfig` is an immutable snapshot; everything derived from
//! it (paths, labels) is recomputed per call.

use crate::calendar::{pattern, resolve_timezone};
use crate::logging::LoggingConfig;
use crate::policy::BackfillPolicy;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PeriodicConfig {
    /// Vault folder that holds the year folders ("" for the vault root)
    #[serde(default)]
    pub root_folder: String,

    /// Name patterns for year, month and day
    #[serde(default)]
    pub formats: FormatConfig,

    #[serde(default)]
    pub daily: DailyConfig,

    #[serde(default)]
    pub monthly: MonthlyConfig,

    /// Date token substituted into templates
    #[serde(default)]
    pub date_token: DateTokenConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Moment-style name patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_year_format")]
    pub year: String,

    /// Month folder name for daily notes, and monthly note name
    #[serde(default = "default_month_format")]
    pub month: String,

    /// Daily note name
    #[serde(default = "default_day_format")]
    pub day: String,

    /// Character that ends the period label in a note name
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_year_format() -> String {
    "YYYY".to_string()
}

fn default_month_format() -> String {
    "MM - MMMM".to_string()
}

fn default_day_format() -> String {
    "DD - dddd".to_string()
}

fn default_separator() -> String {
    "-".to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            year: default_year_format(),
            month: default_month_format(),
            day: default_day_format(),
            separator: default_separator(),
        }
    }
}

impl FormatConfig {
    /// The separator as a character; `-` when unset.
    pub fn separator_char(&self) -> char {
        self.separator.chars().next().unwrap_or('-')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_daily_backfill")]
    pub backfill: BackfillPolicy,

    /// Vault path of the template note (extension optional)
    #[serde(default = "default_daily_template")]
    pub template: String,
}

fn default_true() -> bool {
    true
}

fn default_daily_backfill() -> BackfillPolicy {
    BackfillPolicy::Month
}

fn default_daily_template() -> String {
    "Templates/Daily".to_string()
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backfill: default_daily_backfill(),
            template: default_daily_template(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub backfill: BackfillPolicy,

    #[serde(default = "default_monthly_template")]
    pub template: String,

    /// Folder inside each year folder that holds the monthly notes
    #[serde(default = "default_monthly_folder")]
    pub folder: String,

    /// Day of month a monthly note becomes due; clamped to the month's length
    #[serde(default = "default_day_of_month")]
    pub day_of_month: u32,
}

fn default_monthly_template() -> String {
    "Templates/Monthly".to_string()
}

fn default_monthly_folder() -> String {
    "Monthly".to_string()
}

fn default_day_of_month() -> u32 {
    1
}

impl Default for MonthlyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backfill: BackfillPolicy::None,
            template: default_monthly_template(),
            folder: default_monthly_folder(),
            day_of_month: default_day_of_month(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateTokenConfig {
    /// Literal text replaced in templates ("" disables the substitution)
    #[serde(default = "default_date_token")]
    pub token: String,

    #[serde(default = "default_date_token_format")]
    pub format: String,
}

fn default_date_token() -> String {
    "{{date}}".to_string()
}

fn default_date_token_format() -> String {
    "YYYY-MM-DD".to_string()
}

impl Default for DateTokenConfig {
    fn default() -> Self {
        Self {
            token: default_date_token(),
            format: default_date_token_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// IANA timezone name, or "auto" for the host timezone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Stamp today's note one minute after "now"
    #[serde(default)]
    pub prefer_latest: bool,
}

fn default_timezone() -> String {
    crate::calendar::AUTO_TIMEZONE.to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            prefer_latest: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationConfig {
    /// Report per-note failures at debug verbosity only
    #[serde(default)]
    pub debug_only_failures: bool,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Formats(String),
    Cadence(&'static str, String),
    Schedule(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Formats(msg) => write!(f, "Formats: {}", msg),
            ValidationError::Cadence(cadence, msg) => write!(f, "{} notes: {}", cadence, msg),
            ValidationError::Schedule(msg) => write!(f, "Schedule: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FormatConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (name, value) in [("year", &self.year), ("month", &self.month), ("day", &self.day)] {
            if value.trim().is_empty() {
                errors.push(ValidationError::Formats(format!("{} pattern cannot be empty", name)));
            } else if !pattern::has_tokens(value) {
                errors.push(ValidationError::Formats(format!(
                    "{} pattern '{}' contains no date tokens",
                    name, value
                )));
            }
        }
        if self.separator.chars().count() != 1 {
            errors.push(ValidationError::Formats(format!(
                "separator must be exactly one character, got '{}'",
                self.separator
            )));
        }
        errors
    }
}

impl PeriodicConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.formats.validate();

        if self.daily.enabled && self.daily.template.trim().is_empty() {
            errors.push(ValidationError::Cadence(
                "Daily",
                "template path cannot be empty".to_string(),
            ));
        }

        if self.monthly.enabled {
            if self.monthly.template.trim().is_empty() {
                errors.push(ValidationError::Cadence(
                    "Monthly",
                    "template path cannot be empty".to_string(),
                ));
            }
            if self.monthly.folder.trim().is_empty() {
                errors.push(ValidationError::Cadence(
                    "Monthly",
                    "folder cannot be empty".to_string(),
                ));
            } else if self.monthly.folder.trim().contains(['/', '\\']) {
                errors.push(ValidationError::Cadence(
                    "Monthly",
                    format!(
                        "folder must be a single folder name, got '{}'",
                        self.monthly.folder
                    ),
                ));
            }
            if !(1..=31).contains(&self.monthly.day_of_month) {
                errors.push(ValidationError::Cadence(
                    "Monthly",
                    format!(
                        "day_of_month must be between 1 and 31, got {}",
                        self.monthly.day_of_month
                    ),
                ));
            }
        }

        if let Err(e) = resolve_timezone(&self.schedule.timezone) {
            errors.push(ValidationError::Schedule(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
