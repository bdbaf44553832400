use anyhow::Result;
use lockgate_common::PolicyParams;

use crate::commands::common::Services;
use crate::config::load_config;

pub(crate) async fn command(cli: &crate::Cli, name: &str, params: PolicyParams) -> Result<()> {
    let config = load_config(&cli.config, false)?;
    let services = Services::new(&config).await?;

    services.store.upsert_policy(name, params).await?;
    Ok(())
}
