//! Vault config file source: .periodic-notes/config.toml and
//! .periodic-notes/{PERIODIC_NOTES_ENV}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};

/// Directory inside the vault that holds its configuration.
pub const VAULT_CONFIG_DIR: &str = ".periodic-notes";

pub fn vault_config_dir(vault_root: &Path) -> PathBuf {
    vault_root.join(VAULT_CONFIG_DIR)
}

/// Add vault config files to builder.
/// Precedence: config.toml (base) then {PERIODIC_NOTES_ENV}.toml when the variable is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vault_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = vault_config_dir(vault_root);
    let mut builder = builder;

    let base_config_path = config_dir.join("config.toml");
    if base_config_path.is_file() {
        builder = builder.add_source(File::from(base_config_path).format(FileFormat::Toml));
    }

    if let Ok(env_name) = std::env::var("PERIODIC_NOTES_ENV") {
        let env_config_path = config_dir.join(format!("{}.toml", env_name));
        if env_config_path.is_file() {
            builder = builder.add_source(File::from(env_config_path).format(FileFormat::Toml));
        }
    }

    Ok(builder)
}
