//! Shared test utilities for integration tests
//!
//! Temporary vaults with templates, fixed "now" calendars, a store wrapper
//! that injects failures, and serialized access to environment variables.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use periodic_notes::calendar::Calendar;
use periodic_notes::config::PeriodicConfig;
use periodic_notes::error::StoreError;
use periodic_notes::notify::RecordingNotifier;
use periodic_notes::run::{PlanReport, RunReport, Scheduler};
use periodic_notes::store::{ArtifactEntry, ArtifactLookup, DocumentStore, FsStore};
use periodic_notes::template::TitleExpander;
use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const DAILY_TEMPLATE: &str = "# {{title}}\ncreated: {{date}}\n";
pub const MONTHLY_TEMPLATE: &str = "# {{title}}\n";

/// A vault in a temporary directory.
pub struct TestVault {
    dir: TempDir,
}

impl TestVault {
    /// Empty vault with the default daily and monthly templates.
    pub fn new() -> Self {
        let vault = Self {
            dir: TempDir::new().unwrap(),
        };
        vault.write("Templates/Daily.md", DAILY_TEMPLATE);
        vault.write("Templates/Monthly.md", MONTHLY_TEMPLATE);
        vault
    }

    /// Vault without any template.
    pub fn bare() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }

    pub fn store(&self) -> FsStore {
        FsStore::open(self.path()).unwrap()
    }

    /// Notes under `folder`, excluding templates, sorted.
    pub fn notes_in(&self, folder: &str) -> Vec<String> {
        self.store()
            .list_artifacts()
            .unwrap()
            .into_iter()
            .map(|entry| entry.path)
            .filter(|path| path.starts_with(&format!("{}/", folder)))
            .collect()
    }
}

/// Calendar frozen at an RFC 3339 instant, in UTC.
pub fn calendar_at(rfc3339: &str) -> Calendar {
    calendar_in(rfc3339, chrono_tz::UTC)
}

pub fn calendar_in(rfc3339: &str, tz: Tz) -> Calendar {
    let now = DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc);
    Calendar::at(now, tz)
}

/// Default configuration with the monthly cadence switched off.
pub fn daily_only(config: PeriodicConfig) -> PeriodicConfig {
    let mut config = config;
    config.monthly.enabled = false;
    config
}

pub fn run_with(
    config: &PeriodicConfig,
    calendar: Calendar,
    store: &dyn DocumentStore,
    notifier: &RecordingNotifier,
) -> RunReport {
    Scheduler::new(config, calendar, store, &TitleExpander, notifier).run()
}

pub fn run_once(vault: &TestVault, config: &PeriodicConfig, now: &str) -> RunReport {
    let store = vault.store();
    let notifier = RecordingNotifier::new();
    run_with(config, calendar_at(now), &store, &notifier)
}

pub fn plan_once(vault: &TestVault, config: &PeriodicConfig, now: &str) -> PlanReport {
    let store = vault.store();
    let notifier = RecordingNotifier::new();
    Scheduler::new(config, calendar_at(now), &store, &TitleExpander, &notifier).plan()
}

/// Store wrapper that fails selected operations.
pub struct FlakyStore {
    inner: FsStore,
    fail_creates: HashSet<String>,
    fail_folders: HashSet<String>,
    fail_listing_after: Option<usize>,
    listings: Cell<usize>,
}

impl FlakyStore {
    pub fn new(inner: FsStore) -> Self {
        Self {
            inner,
            fail_creates: HashSet::new(),
            fail_folders: HashSet::new(),
            fail_listing_after: None,
            listings: Cell::new(0),
        }
    }

    /// Fail `create_artifact` for this exact note path.
    pub fn failing_create(mut self, path: &str) -> Self {
        self.fail_creates.insert(path.to_string());
        self
    }

    /// Fail `create_folder` for this folder and report it as missing, so
    /// every cascade through it attempts and fails that step.
    pub fn failing_folder(mut self, path: &str) -> Self {
        self.fail_folders.insert(path.to_string());
        self
    }

    /// Let `successful` listings through, then fail every later one.
    pub fn failing_listing_after(mut self, successful: usize) -> Self {
        self.fail_listing_after = Some(successful);
        self
    }
}

impl DocumentStore for FlakyStore {
    fn list_artifacts(&self) -> Result<Vec<ArtifactEntry>, StoreError> {
        let count = self.listings.get();
        self.listings.set(count + 1);
        match self.fail_listing_after {
            Some(limit) if count >= limit => Err(StoreError::InvalidPath("listing unavailable".to_string())),
            _ => self.inner.list_artifacts(),
        }
    }

    fn read_artifact(&self, path: &str) -> Result<ArtifactLookup, StoreError> {
        self.inner.read_artifact(path)
    }

    fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        if self.fail_folders.contains(path) {
            return Err(StoreError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        self.inner.create_folder(path)
    }

    fn create_artifact(&self, path: &str, content: &str) -> Result<(), StoreError> {
        if self.fail_creates.contains(path) {
            return Err(StoreError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        self.inner.create_artifact(path, content)
    }

    fn exists(&self, path: &str) -> bool {
        !self.fail_folders.contains(path) && self.inner.exists(path)
    }
}

/// Environment variable state to restore after a test
struct EnvState {
    vars: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(names: &[&str]) -> Self {
        Self {
            vars: names
                .iter()
                .map(|name| (name.to_string(), std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
    }
}

/// Run `f` with the given environment variables set and an isolated
/// `XDG_CONFIG_HOME`/`HOME` under `test_dir`; everything is restored after.
pub fn with_env<F, R>(test_dir: &Path, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let mut names: Vec<&str> = vec!["HOME", "XDG_CONFIG_HOME", "PERIODIC_NOTES_ENV"];
    names.extend(vars.iter().map(|(name, _)| *name));
    let env_state = EnvState::capture(&names);

    let home = test_dir.join("home");
    let config_home = test_dir.join("config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::remove_var("PERIODIC_NOTES_ENV");
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    env_state.restore();

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
