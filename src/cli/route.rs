//! CLI route: single route table and run context. Dispatches to the scheduler and presentation.

use crate::calendar::{resolve_timezone, Calendar};
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_config_toml, format_plan_json, format_plan_text, format_run_json, format_run_text,
};
use crate::config::{ConfigLoader, PeriodicConfig};
use crate::error::ApiError;
use crate::notify::TracingNotifier;
use crate::run::Scheduler;
use crate::store::FsStore;
use crate::template::TitleExpander;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: vault, effective config and store.
/// Built from the vault path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: PeriodicConfig,
    store: FsStore,
    timezone: Tz,
}

impl RunContext {
    /// Create run context from vault root and optional config path.
    ///
    /// Fails when the configuration does not load or validate, or when the
    /// vault is not a directory.
    pub fn new(vault_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&vault_root)?
        };

        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ApiError::ConfigError(messages.join("; ")));
        }

        let store = FsStore::open(&vault_root)?;
        let timezone = resolve_timezone(&config.schedule.timezone)?;

        Ok(Self {
            config,
            store,
            timezone,
        })
    }

    pub fn config(&self) -> &PeriodicConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Run { now, format } => {
                let calendar = self.calendar(now.as_deref())?;
                let notifier = TracingNotifier::default();
                let scheduler =
                    Scheduler::new(&self.config, calendar, &self.store, &TitleExpander, &notifier);
                let report = scheduler.run();
                info!(
                    vault = %self.store.root().display(),
                    created = report.created_count(),
                    "Run completed"
                );
                match format {
                    OutputFormat::Text => Ok(format_run_text(&report)),
                    OutputFormat::Json => format_run_json(&report),
                }
            }
            Commands::Plan { now, format } => {
                let calendar = self.calendar(now.as_deref())?;
                let notifier = TracingNotifier::default();
                let scheduler =
                    Scheduler::new(&self.config, calendar, &self.store, &TitleExpander, &notifier);
                let plan = scheduler.plan();
                match format {
                    OutputFormat::Text => Ok(format_plan_text(&plan)),
                    OutputFormat::Json => format_plan_json(&plan),
                }
            }
            Commands::Config => format_config_toml(&self.config),
        }
    }

    fn calendar(&self, now: Option<&str>) -> Result<Calendar, ApiError> {
        match now {
            Some(value) => Ok(Calendar::at(parse_now(value, self.timezone)?, self.timezone)),
            None => Ok(Calendar::new(self.timezone)),
        }
    }
}

/// Parse a `--now` value: an RFC 3339 instant, or a bare `YYYY-MM-DD` that
/// stands for noon of that day in `tz`.
pub fn parse_now(value: &str, tz: Tz) -> Result<DateTime<Utc>, ApiError> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::InvalidArgument(format!(
            "--now expects an RFC 3339 instant or YYYY-MM-DD, got '{}'",
            value
        ))
    })?;
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
    tz.from_local_datetime(&noon)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ApiError::InvalidArgument(format!("{} does not exist in {}", noon, tz.name())))
}
