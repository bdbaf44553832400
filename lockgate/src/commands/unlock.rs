use anyhow::Result;
use tracing::*;

use crate::commands::common::Services;
use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli, principal: &str) -> Result<()> {
    let config = load_config(&cli.config, false)?;
    let services = Services::new(&config).await?;

    services.lockout.unlock(principal).await?;
    info!("{principal} can log in again");
    Ok(())
}
