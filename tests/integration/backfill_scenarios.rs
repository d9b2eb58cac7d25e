//! End-to-end backfill scenarios against a temporary vault

use periodic_notes::config::PeriodicConfig;
use periodic_notes::notify::RecordingNotifier;
use periodic_notes::policy::BackfillPolicy;

use crate::integration::{calendar_in, daily_only, run_once, run_with, TestVault};

fn daily_policy(policy: BackfillPolicy) -> PeriodicConfig {
    let mut config = daily_only(PeriodicConfig::default());
    config.daily.backfill = policy;
    config
}

#[test]
fn test_year_policy_fills_every_day_since_january() {
    let vault = TestVault::new();
    let report = run_once(&vault, &daily_policy(BackfillPolicy::Year), "2024-03-15T10:00:00Z");

    assert_eq!(report.daily.created.len(), 75);
    assert!(report.daily.failures.is_empty());
    assert_eq!(vault.notes_in("2024/01 - January").len(), 31);
    assert_eq!(vault.notes_in("2024/02 - February").len(), 29);
    assert_eq!(vault.notes_in("2024/03 - March").len(), 15);
    assert!(vault.exists("2024/01 - January/01 - Monday.md"));
    assert!(vault.exists("2024/02 - February/29 - Thursday.md"));
    assert!(!vault.exists("2024/03 - March/16 - Saturday.md"));
    assert!(!vault.exists("2024/04 - April"));
}

#[test]
fn test_created_paths_are_chronological() {
    let vault = TestVault::new();
    let report = run_once(&vault, &daily_policy(BackfillPolicy::Year), "2024-02-03T10:00:00Z");

    assert_eq!(
        report.daily.created.first().map(String::as_str),
        Some("2024/01 - January/01 - Monday.md")
    );
    assert_eq!(
        report.daily.created.last().map(String::as_str),
        Some("2024/02 - February/03 - Saturday.md")
    );
}

#[test]
fn test_none_policy_creates_only_today() {
    let vault = TestVault::new();
    let report = run_once(&vault, &daily_policy(BackfillPolicy::None), "2024-03-15T10:00:00Z");

    assert_eq!(report.daily.created, vec!["2024/03 - March/15 - Friday.md".to_string()]);
    assert_eq!(vault.notes_in("2024").len(), 1);
}

#[test]
fn test_existing_note_with_same_label_blocks_today() {
    let vault = TestVault::new();
    vault.write("2024/03 - March/15 - Friday.md", "my own words");

    let report = run_once(&vault, &daily_policy(BackfillPolicy::None), "2024-03-15T10:00:00Z");

    assert!(report.daily.created.is_empty());
    assert_eq!(vault.read("2024/03 - March/15 - Friday.md"), "my own words");
}

#[test]
fn test_renamed_note_still_counts_for_its_day() {
    let vault = TestVault::new();
    vault.write("2024/03 - March/05 - dentist.md", "");

    let report = run_once(&vault, &daily_policy(BackfillPolicy::Month), "2024-03-15T10:00:00Z");

    assert_eq!(report.daily.created.len(), 14);
    assert!(!vault.exists("2024/03 - March/05 - Tuesday.md"));
}

#[test]
fn test_month_policy_leaves_earlier_months_alone() {
    let vault = TestVault::new();
    let report = run_once(&vault, &daily_policy(BackfillPolicy::Month), "2024-03-15T10:00:00Z");

    assert_eq!(report.daily.created.len(), 15);
    assert!(!vault.exists("2024/02 - February"));
}

#[test]
fn test_monthly_note_for_current_month() {
    let vault = TestVault::new();
    let mut config = PeriodicConfig::default();
    config.daily.enabled = false;
    config.monthly.backfill = BackfillPolicy::Month;
    config.monthly.day_of_month = 1;

    let report = run_once(&vault, &config, "2024-03-15T10:00:00Z");

    assert!(!report.daily.enabled);
    assert_eq!(report.monthly.created, vec!["2024/Monthly/03 - March.md".to_string()]);
    assert_eq!(vault.read("2024/Monthly/03 - March.md"), "# 03 - March\n");
}

#[test]
fn test_monthly_year_policy_with_root_folder() {
    let vault = TestVault::new();
    let mut config = PeriodicConfig::default();
    config.root_folder = "Journal".to_string();
    config.daily.enabled = false;
    config.monthly.backfill = BackfillPolicy::Year;
    vault.write("Journal/2024/Monthly/02 - Feb.md", "");

    let report = run_once(&vault, &config, "2024-03-15T10:00:00Z");

    assert_eq!(
        report.monthly.created,
        vec![
            "Journal/2024/Monthly/01 - January.md".to_string(),
            "Journal/2024/Monthly/03 - March.md".to_string(),
        ]
    );
}

#[test]
fn test_today_follows_configured_timezone() {
    let vault = TestVault::new();
    let config = daily_policy(BackfillPolicy::None);
    let store = vault.store();
    let notifier = RecordingNotifier::new();

    // 23:30 UTC on the 15th is already the 16th in Auckland.
    let calendar = calendar_in("2024-03-15T23:30:00Z", chrono_tz::Pacific::Auckland);
    let report = run_with(&config, calendar, &store, &notifier);

    assert_eq!(report.daily.created, vec!["2024/03 - March/16 - Saturday.md".to_string()]);
    assert_eq!(report.timezone, "Pacific/Auckland");
}

#[test]
fn test_new_month_in_local_time() {
    let vault = TestVault::new();
    let config = daily_policy(BackfillPolicy::Month);
    let store = vault.store();
    let notifier = RecordingNotifier::new();

    let calendar = calendar_in("2024-03-31T23:00:00Z", chrono_tz::Europe::Berlin);
    let report = run_with(&config, calendar, &store, &notifier);

    assert_eq!(report.daily.created, vec!["2024/04 - April/01 - Monday.md".to_string()]);
}
