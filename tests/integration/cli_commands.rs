//! Integration tests for the CLI route table

use clap::Parser;
use periodic_notes::cli::{Cli, Commands, OutputFormat, RunContext};
use periodic_notes::error::ApiError;
use tempfile::TempDir;

use crate::integration::{with_env, TestVault};

fn context(test_dir: &TempDir, vault: &TestVault) -> RunContext {
    vault.write(".periodic-notes/config.toml", "[schedule]\ntimezone = \"UTC\"\n");
    with_env(test_dir.path(), &[], || {
        RunContext::new(vault.path().to_path_buf(), None).unwrap()
    })
}

#[test]
fn test_cli_parses_run_with_now() {
    let cli = Cli::try_parse_from([
        "periodic-notes",
        "--vault",
        "/tmp/vault",
        "run",
        "--now",
        "2024-03-15T10:00:00Z",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.vault.to_string_lossy(), "/tmp/vault");
    match cli.command {
        Commands::Run { now, format } => {
            assert_eq!(now.as_deref(), Some("2024-03-15T10:00:00Z"));
            assert_eq!(format, OutputFormat::Json);
        }
        _ => panic!("expected run"),
    }
}

#[test]
fn test_cli_rejects_unknown_format() {
    let result = Cli::try_parse_from(["periodic-notes", "plan", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn test_plan_then_run_then_plan() {
    let test_dir = TempDir::new().unwrap();
    let vault = TestVault::new();
    let ctx = context(&test_dir, &vault);
    let now = Some("2024-03-15T10:00:00Z".to_string());

    let plan = ctx
        .execute(&Commands::Plan {
            now: now.clone(),
            format: OutputFormat::Text,
        })
        .unwrap();
    assert!(plan.contains("2024/03 - March/15 - Friday.md"));
    assert!(plan.contains("Total: 16 note(s) to create"));

    let run = ctx
        .execute(&Commands::Run {
            now: now.clone(),
            format: OutputFormat::Json,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&run).unwrap();
    assert_eq!(value["daily"]["created"].as_array().unwrap().len(), 15);
    assert_eq!(value["monthly"]["created"][0], "2024/Monthly/03 - March.md");
    assert_eq!(value["timezone"], "UTC");

    let again = ctx
        .execute(&Commands::Plan {
            now,
            format: OutputFormat::Text,
        })
        .unwrap();
    assert!(again.contains("Nothing to create."));
}

#[test]
fn test_bad_now_is_an_invalid_argument() {
    let test_dir = TempDir::new().unwrap();
    let vault = TestVault::new();
    let ctx = context(&test_dir, &vault);

    let err = ctx
        .execute(&Commands::Run {
            now: Some("15/03/2024".to_string()),
            format: OutputFormat::Text,
        })
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidArgument(_)));
    assert!(!vault.exists("2024"));
}

#[test]
fn test_run_with_missing_template_still_succeeds() {
    let test_dir = TempDir::new().unwrap();
    let vault = TestVault::bare();
    let ctx = context(&test_dir, &vault);

    let out = ctx
        .execute(&Commands::Run {
            now: Some("2024-03-15".to_string()),
            format: OutputFormat::Text,
        })
        .unwrap();

    assert!(out.contains("Stopped: Template not found: Templates/Daily.md"));
    assert!(out.contains("Total: 0 note(s) created"));
}

#[test]
fn test_unknown_timezone_fails_context() {
    let test_dir = TempDir::new().unwrap();
    let vault = TestVault::new();
    vault.write(".periodic-notes/config.toml", "[schedule]\ntimezone = \"Nowhere/Land\"\n");

    let result = with_env(test_dir.path(), &[], || {
        RunContext::new(vault.path().to_path_buf(), None)
    });

    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}
