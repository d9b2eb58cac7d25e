//! Environment source: PERIODIC_NOTES__SECTION__KEY overrides single keys,
//! e.g. `PERIODIC_NOTES__DAILY__BACKFILL=year`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "PERIODIC_NOTES";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
