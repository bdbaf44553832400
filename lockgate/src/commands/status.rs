use anyhow::Result;
use lockgate_common::{LockState, Timestamp};

use crate::commands::common::Services;
use crate::config::load_config;

fn format_timestamp(stamp: Option<Timestamp>) -> String {
    match stamp.and_then(Timestamp::to_datetime) {
        Some(datetime) => datetime.to_rfc3339(),
        None => "never".into(),
    }
}

pub(crate) async fn command(cli: &crate::Cli, principal: &str) -> Result<()> {
    let config = load_config(&cli.config, false)?;
    let services = Services::new(&config).await?;

    let status = services.lockout.status(principal, Timestamp::now()).await?;

    println!("Principal:        {}", status.record.name);
    println!(
        "Policy:           {}",
        status.record.policy.as_deref().unwrap_or("(none)")
    );
    println!("  max_fail:         {}", status.policy.max_fail);
    println!("  failcnt_interval: {}s", status.policy.failcnt_interval);
    println!("  lockout_duration: {}s", status.policy.lockout_duration);
    println!("Failed attempts:  {}", status.record.fail_auth_count);
    println!("Last failure:     {}", format_timestamp(status.record.last_failed));
    println!("Last success:     {}", format_timestamp(status.record.last_success));
    println!("Requires preauth: {}", status.record.requires_preauth);
    match status.state {
        LockState::Unlocked => println!("Lock:             none"),
        LockState::PermanentlyLocked => println!("Lock:             permanent"),
        LockState::LockedUntil(until) => {
            println!("Lock:             until {}", format_timestamp(Some(until)))
        }
    }
    println!(
        "Locked out now:   {}",
        if status.locked_out { "yes" } else { "no" }
    );
    Ok(())
}
