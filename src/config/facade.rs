//! Config loading entry points used by the CLI.

use crate::config::merge::builder_with_defaults;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::PeriodicConfig;
use config::{ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `PeriodicConfig` from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a vault.
    ///
    /// Precedence (highest last): defaults, global file, vault files,
    /// environment variables.
    pub fn load(vault_root: &Path) -> Result<PeriodicConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, vault_root)?;
        let builder = environment::add_to_builder(builder);

        let config: PeriodicConfig = builder.build()?.try_deserialize()?;
        debug!(vault = %vault_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file, skipping the global and
    /// vault files. Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<PeriodicConfig, ConfigError> {
        let builder = builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Built-in defaults only.
    pub fn default() -> PeriodicConfig {
        PeriodicConfig::default()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    pub fn vault_config_dir(vault_root: &Path) -> PathBuf {
        workspace_file::vault_config_dir(vault_root)
    }
}
