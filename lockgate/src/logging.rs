use anyhow::Result;
use time::{format_description, UtcOffset};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "lockgate=info,lockgate_core=info,lockgate_common=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Full timestamps and targets when logging to a file or journal, a terse
/// colored format when someone is watching the terminal
pub fn init_logging() -> Result<()> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let attended = console::user_attended();

    let (full_layer, compact_layer) = if attended {
        let timer = OffsetTime::new(offset, format_description::parse("[hour]:[minute]:[second]")?);
        let layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(true)
            .with_target(false)
            .with_timer(timer)
            .with_filter(env_filter());
        (None, Some(layer))
    } else {
        let timer = OffsetTime::new(
            offset,
            format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
        );
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(timer)
            .with_filter(env_filter());
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(full_layer)
        .with(compact_layer)
        .init();
    Ok(())
}
