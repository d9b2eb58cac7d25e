//! Integration tests for the periodic note scheduler

mod backfill_scenarios;
mod cli_commands;
mod idempotence;
mod test_utils;

pub use test_utils::*;
