//! File-backed `tracing` setup. The terminal belongs to the UI, so log lines
//! go to a file; `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps `-v` counts on top of the configured level.
pub fn level_from(configured: &str, verbosity: u8) -> Level {
    let base = configured.parse::<Level>().unwrap_or(Level::INFO);
    match verbosity {
        0 => base,
        1 => base.max(Level::DEBUG),
        _ => Level::TRACE,
    }
}

pub fn init_logging(path: &Path, level: Level) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,folio={}", level.as_str().to_lowercase())));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_from("warn", 0), Level::WARN);
        assert_eq!(level_from("warn", 1), Level::DEBUG);
        assert_eq!(level_from("info", 3), Level::TRACE);
        assert_eq!(level_from("nonsense", 0), Level::INFO);
    }
}
