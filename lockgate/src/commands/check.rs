use anyhow::Result;
use tracing::*;

use crate::commands::common::Services;
use crate::config::load_config;

/// Validates the config file and makes sure the database is reachable and
/// migrated
pub(crate) async fn command(cli: &crate::Cli) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let lockout = &config.store.lockout;
    debug!(
        strict_policy_resolution = lockout.strict_policy_resolution,
        panic_on_invariant_violation = lockout.panic_on_invariant_violation,
        "Lockout settings"
    );

    Services::new(&config).await?;
    info!("Config and database look fine");
    Ok(())
}
