//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources override earlier ones key by key, so a vault file that only
//! sets `[daily] backfill` keeps every other default.

use crate::config::PeriodicConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder seeded with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&PeriodicConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
