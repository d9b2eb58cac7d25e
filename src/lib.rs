//! Periodic Notes: Daily and Monthly Note Backfill
//!
//! Creates the daily and monthly notes of a Markdown vault from templates,
//! backfilling missed periods of the current year according to a per-cadence
//! policy. Existing notes are never overwritten.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod layout;
pub mod logging;
pub mod materialize;
pub mod notify;
pub mod policy;
pub mod run;
pub mod store;
pub mod template;
