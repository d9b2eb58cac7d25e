//! Orchestrator: one scheduler run
//!
//! Daily generation runs before monthly generation. A template or listing
//! failure ends only its own cadence; a failed note ends only its own period.
//! Every outcome lands in the `RunReport`; nothing propagates out of `run`.

use crate::calendar::Calendar;
use crate::config::PeriodicConfig;
use crate::error::GenerationError;
use crate::generation::{plan_monthly, Cadence, DailyPeriods, PlannedNote};
use crate::materialize::{MaterializeStatus, Materializer};
use crate::notify::Notifier;
use crate::store::{
    has_extension, normalize_store_path, with_note_extension, ArtifactEntry, ArtifactLookup,
    DocumentStore,
};
use crate::template::VariableExpander;
use serde::Serialize;
use tracing::{info, warn};

/// A note that could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodFailure {
    pub path: String,
    pub error: String,
}

/// Result of processing one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodOutcome {
    Created { path: String, folder_failures: Vec<String> },
    AlreadyExists { path: String },
    Failed(PeriodFailure),
}

/// Outcome of one cadence in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CadenceReport {
    pub cadence: Cadence,
    pub enabled: bool,
    pub created: Vec<String>,
    pub already_existing: Vec<String>,
    pub failures: Vec<PeriodFailure>,
    /// Folder cascade steps that failed without failing their note
    pub folder_failures: Vec<String>,
    /// Set when the cadence stopped early (template or listing problem)
    pub aborted: Option<String>,
}

impl CadenceReport {
    fn new(cadence: Cadence, enabled: bool) -> Self {
        Self {
            cadence,
            enabled,
            created: Vec::new(),
            already_existing: Vec::new(),
            failures: Vec::new(),
            folder_failures: Vec::new(),
            aborted: None,
        }
    }

    fn record(&mut self, outcome: PeriodOutcome) {
        match outcome {
            PeriodOutcome::Created {
                path,
                folder_failures,
            } => {
                self.created.push(path);
                self.folder_failures.extend(folder_failures);
            }
            PeriodOutcome::AlreadyExists { path } => self.already_existing.push(path),
            PeriodOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.folder_failures.is_empty() && self.aborted.is_none()
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub now: String,
    pub timezone: String,
    pub daily: CadenceReport,
    pub monthly: CadenceReport,
}

impl RunReport {
    pub fn created_count(&self) -> usize {
        self.daily.created.len() + self.monthly.created.len()
    }
}

/// A planned note, as shown by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub cadence: Cadence,
    pub path: String,
    pub label: String,
    pub date: String,
    pub created_at: String,
}

impl From<&PlannedNote> for PlanEntry {
    fn from(note: &PlannedNote) -> Self {
        Self {
            cadence: note.cadence,
            path: note.path.clone(),
            label: note.label.clone(),
            date: note.date.naive_date().to_string(),
            created_at: note.created_at.instant().to_rfc3339(),
        }
    }
}

/// Planned notes for one cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CadencePlan {
    pub cadence: Cadence,
    pub enabled: bool,
    pub notes: Vec<PlanEntry>,
    pub aborted: Option<String>,
}

/// Dry-run result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub now: String,
    pub timezone: String,
    pub daily: CadencePlan,
    pub monthly: CadencePlan,
}

/// Wires the collaborators for a run.
pub struct Scheduler<'a> {
    config: &'a PeriodicConfig,
    calendar: Calendar,
    store: &'a dyn DocumentStore,
    expander: &'a dyn VariableExpander,
    notifier: &'a dyn Notifier,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        config: &'a PeriodicConfig,
        calendar: Calendar,
        store: &'a dyn DocumentStore,
        expander: &'a dyn VariableExpander,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            calendar,
            store,
            expander,
            notifier,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Create every missing note that is due.
    pub fn run(&self) -> RunReport {
        info!(now = %self.calendar.now().instant().to_rfc3339(), "Starting periodic note run");

        let daily = if self.config.daily.enabled {
            self.run_daily()
        } else {
            CadenceReport::new(Cadence::Daily, false)
        };
        let monthly = if self.config.monthly.enabled {
            self.run_monthly()
        } else {
            CadenceReport::new(Cadence::Monthly, false)
        };

        info!(
            daily_created = daily.created.len(),
            monthly_created = monthly.created.len(),
            failures = daily.failures.len() + monthly.failures.len(),
            "Periodic note run finished"
        );

        RunReport {
            now: self.calendar.now().instant().to_rfc3339(),
            timezone: self.calendar.timezone().name().to_string(),
            daily,
            monthly,
        }
    }

    /// Compute the notes a run would create, without writing anything.
    pub fn plan(&self) -> PlanReport {
        let daily = if self.config.daily.enabled {
            self.plan_daily()
        } else {
            CadencePlan {
                cadence: Cadence::Daily,
                enabled: false,
                notes: Vec::new(),
                aborted: None,
            }
        };
        let monthly = if self.config.monthly.enabled {
            self.plan_monthly()
        } else {
            CadencePlan {
                cadence: Cadence::Monthly,
                enabled: false,
                notes: Vec::new(),
                aborted: None,
            }
        };

        PlanReport {
            now: self.calendar.now().instant().to_rfc3339(),
            timezone: self.calendar.timezone().name().to_string(),
            daily,
            monthly,
        }
    }

    fn run_daily(&self) -> CadenceReport {
        let mut report = CadenceReport::new(Cadence::Daily, true);
        let template = match self.load_template(&self.config.daily.template) {
            Ok(template) => template,
            Err(e) => {
                self.abort(&mut report, e);
                return report;
            }
        };

        for month in DailyPeriods::new(self.config, &self.calendar, self.store) {
            let month = match month {
                Ok(month) => month,
                Err(e) => {
                    self.abort(&mut report, e);
                    return report;
                }
            };
            for note in &month.notes {
                report.record(self.materialize_period(note, &template, &month.listing));
            }
        }

        report
    }

    fn run_monthly(&self) -> CadenceReport {
        let mut report = CadenceReport::new(Cadence::Monthly, true);
        let template = match self.load_template(&self.config.monthly.template) {
            Ok(template) => template,
            Err(e) => {
                self.abort(&mut report, e);
                return report;
            }
        };
        let listing = match self.store.list_artifacts() {
            Ok(listing) => listing,
            Err(e) => {
                self.abort(&mut report, GenerationError::ListingFailed(e));
                return report;
            }
        };

        for note in plan_monthly(self.config, &self.calendar, &listing) {
            report.record(self.materialize_period(&note, &template, &listing));
        }

        report
    }

    fn plan_daily(&self) -> CadencePlan {
        let mut plan = CadencePlan {
            cadence: Cadence::Daily,
            enabled: true,
            notes: Vec::new(),
            aborted: None,
        };
        if let Err(e) = self.load_template(&self.config.daily.template) {
            plan.aborted = Some(e.to_string());
            return plan;
        }
        for month in DailyPeriods::new(self.config, &self.calendar, self.store) {
            match month {
                Ok(month) => plan.notes.extend(month.notes.iter().map(PlanEntry::from)),
                Err(e) => {
                    plan.aborted = Some(e.to_string());
                    break;
                }
            }
        }
        plan
    }

    fn plan_monthly(&self) -> CadencePlan {
        let mut plan = CadencePlan {
            cadence: Cadence::Monthly,
            enabled: true,
            notes: Vec::new(),
            aborted: None,
        };
        if let Err(e) = self.load_template(&self.config.monthly.template) {
            plan.aborted = Some(e.to_string());
            return plan;
        }
        match self.store.list_artifacts() {
            Ok(listing) => {
                let notes = plan_monthly(self.config, &self.calendar, &listing);
                plan.notes = notes.iter().map(PlanEntry::from).collect();
            }
            Err(e) => plan.aborted = Some(GenerationError::ListingFailed(e).to_string()),
        }
        plan
    }

    fn materialize_period(
        &self,
        note: &PlannedNote,
        template: &str,
        listing: &[ArtifactEntry],
    ) -> PeriodOutcome {
        let materializer = Materializer::new(self.store, self.expander, self.notifier, self.config);
        match materializer.materialize(&note.created_at, &note.path, template, listing) {
            Ok(done) => match done.status {
                MaterializeStatus::Created => PeriodOutcome::Created {
                    path: done.path,
                    folder_failures: done.folder_failures,
                },
                MaterializeStatus::AlreadyExists => PeriodOutcome::AlreadyExists { path: done.path },
            },
            Err(e) => {
                warn!(cadence = %note.cadence, path = %note.path, error = %e, "Note creation failed");
                self.notifier
                    .notify(&e.to_string(), self.config.notifications.debug_only_failures);
                PeriodOutcome::Failed(PeriodFailure {
                    path: note.path.clone(),
                    error: e.to_string(),
                })
            }
        }
    }

    /// Read a template; a configured path without any extension gets `.md`.
    fn load_template(&self, configured: &str) -> Result<String, GenerationError> {
        let raw = normalize_store_path(configured);
        let path = if has_extension(&raw) {
            raw.clone()
        } else {
            with_note_extension(&raw)
        };
        match self.store.read_artifact(&path) {
            Ok(ArtifactLookup::Found(text)) => Ok(text),
            Ok(ArtifactLookup::Folder) => Err(GenerationError::TemplateIsNotAFile(path)),
            Ok(ArtifactLookup::NotFound) => {
                if raw != path && self.store.read_artifact(&raw).ok() == Some(ArtifactLookup::Folder) {
                    Err(GenerationError::TemplateIsNotAFile(raw))
                } else {
                    Err(GenerationError::TemplateNotFound(path))
                }
            }
            Err(source) => Err(GenerationError::TemplateReadFailed { path, source }),
        }
    }

    fn abort(&self, report: &mut CadenceReport, error: GenerationError) {
        warn!(cadence = %report.cadence, error = %error, "Cadence aborted");
        let message = format!("Cannot create {} notes: {}", report.cadence, error);
        self.notifier.notify(&message, false);
        report.aborted = Some(error.to_string());
    }
}
