use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use lockgate_common::helpers::fs::secure_file;
use lockgate_common::{LockgateConfig, LockgateConfigStore};
use tracing::*;

pub fn load_config(path: &Path, secure: bool) -> Result<LockgateConfig> {
    if secure {
        secure_file(path).context("Could not secure config")?;
    }

    let store: LockgateConfigStore = Config::builder()
        .add_source(File::from(path))
        .add_source(
            Environment::with_prefix("LOCKGATE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Could not load config")?
        .try_deserialize()
        .context("Could not parse config")?;

    let config = LockgateConfig {
        store,
        paths_relative_to: path
            .parent()
            .context("Config path has no parent directory")?
            .to_path_buf(),
    };
    config.validate();

    info!(
        "Using config: {path:?} (strict policy resolution: {})",
        config.store.lockout.strict_policy_resolution,
    );
    Ok(config)
}
