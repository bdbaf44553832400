mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use logging::init_logging;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, env = "LOCKGATE_CONFIG", default_value = "/etc/lockgate.yaml")]
    config: PathBuf,
}

#[derive(clap::Subcommand)]
pub(crate) enum Commands {
    /// Validate config file
    Check,
    /// Show the lock state of a principal
    Status { principal: String },
    /// Clear the lock and failure counter of a principal
    Unlock { principal: String },
    /// Create or update a password policy
    Policy {
        name: String,
        /// Failures before an account locks (0 = never)
        #[arg(long, default_value_t = 0)]
        max_fail: u32,
        /// Seconds after which a failure streak restarts (0 = never)
        #[arg(long, default_value_t = 0)]
        failcnt_interval: u32,
        /// Seconds a lock lasts (0 = until unlocked)
        #[arg(long, default_value_t = 0)]
        lockout_duration: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check => crate::commands::check::command(&cli).await,
        Commands::Status { principal } => crate::commands::status::command(&cli, principal).await,
        Commands::Unlock { principal } => crate::commands::unlock::command(&cli, principal).await,
        Commands::Policy {
            name,
            max_fail,
            failcnt_interval,
            lockout_duration,
        } => {
            crate::commands::policy::command(
                &cli,
                name,
                lockgate_common::PolicyParams {
                    max_fail: *max_fail,
                    failcnt_interval: *failcnt_interval,
                    lockout_duration: *lockout_duration,
                },
            )
            .await
        }
    }
}
