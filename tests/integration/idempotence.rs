//! A second run over the same vault creates nothing

use periodic_notes::config::PeriodicConfig;
use periodic_notes::policy::BackfillPolicy;

use crate::integration::{plan_once, run_once, TestVault};

fn year_config() -> PeriodicConfig {
    let mut config = PeriodicConfig::default();
    config.daily.backfill = BackfillPolicy::Year;
    config.monthly.backfill = BackfillPolicy::Year;
    config
}

#[test]
fn test_second_run_is_a_no_op() {
    let vault = TestVault::new();
    let config = year_config();

    let first = run_once(&vault, &config, "2024-03-15T10:00:00Z");
    assert_eq!(first.daily.created.len(), 75);
    assert_eq!(first.monthly.created.len(), 3);
    let before = vault.read("2024/03 - March/15 - Friday.md");

    let second = run_once(&vault, &config, "2024-03-15T18:00:00Z");
    assert_eq!(second.created_count(), 0);
    assert!(second.daily.failures.is_empty());
    assert_eq!(vault.read("2024/03 - March/15 - Friday.md"), before);
}

#[test]
fn test_next_day_adds_only_the_new_day() {
    let vault = TestVault::new();
    let config = year_config();

    run_once(&vault, &config, "2024-03-15T10:00:00Z");
    let next = run_once(&vault, &config, "2024-03-16T08:00:00Z");

    assert_eq!(next.daily.created, vec!["2024/03 - March/16 - Saturday.md".to_string()]);
    assert!(next.monthly.created.is_empty());
}

#[test]
fn test_plan_matches_run() {
    let vault = TestVault::new();
    let config = year_config();

    let plan = plan_once(&vault, &config, "2024-03-15T10:00:00Z");
    assert!(!vault.exists("2024"));

    let report = run_once(&vault, &config, "2024-03-15T10:00:00Z");
    let planned: Vec<String> = plan.daily.notes.iter().map(|n| n.path.clone()).collect();
    assert_eq!(planned, report.daily.created);
    assert_eq!(plan.monthly.notes.len(), report.monthly.created.len());

    let after = plan_once(&vault, &config, "2024-03-15T10:00:00Z");
    assert!(after.daily.notes.is_empty());
    assert!(after.monthly.notes.is_empty());
}

#[test]
fn test_plan_after_run_is_empty_with_untidy_monthly_folder() {
    let vault = TestVault::new();
    let mut config = year_config();
    config.daily.enabled = false;
    config.monthly.folder = "Monthly/".to_string();

    let first = run_once(&vault, &config, "2024-03-15T10:00:00Z");
    assert_eq!(first.monthly.created.len(), 3);
    assert!(vault.exists("2024/Monthly/02 - February.md"));

    let after = plan_once(&vault, &config, "2024-03-15T10:00:00Z");
    assert!(after.monthly.notes.is_empty());
}
