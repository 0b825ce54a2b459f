use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::visibility::{RootMargin, Threshold};

static BLUEPRINT: &str = include_str!("../folio.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingSettings {
    pub scroll_throttle_ms: u64,
    pub pointer_throttle_ms: u64,
    pub resize_debounce_ms: u64,
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionSettings {
    pub reduced: bool,
    pub smooth_scroll_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevealSettings {
    pub enabled: bool,
    pub root_margin: String,
    pub threshold: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutSettings {
    pub mobile_breakpoint: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub header_offset: u16,
    pub content_path: Option<String>,
    pub timing: TimingSettings,
    pub motion: MotionSettings,
    pub reveal: RevealSettings,
    pub layout: LayoutSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Layers the built-in defaults, the user config, a `folio.toml` in the
    /// working directory and finally `explicit`, if given.
    pub fn new(explicit: Option<&Path>) -> Result<Self> {
        let user_config_path = get_user_config_path();
        if let Some(path) = user_config_path.as_deref() {
            ensure_user_config(path);
        }

        let mut builder = Config::builder()
            // 1. Defaults compiled into the binary.
            .add_source(File::from_str(BLUEPRINT, FileFormat::Toml));
        // 2. User's global config, seeded from the defaults above.
        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).required(false));
        }
        // 3. Local folio.toml from CWD.
        builder = builder.add_source(File::with_name("folio.toml").required(false));
        // 4. --config, which must exist.
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Defaults only, without touching the filesystem.
    #[cfg(test)]
    pub fn defaults() -> Result<Self> {
        Ok(Config::builder()
            .add_source(File::from_str(BLUEPRINT, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        self.root_margin()?;
        self.threshold()?;
        Ok(())
    }

    pub fn root_margin(&self) -> Result<RootMargin> {
        self.reveal.root_margin.parse()
    }

    pub fn threshold(&self) -> Result<Threshold> {
        Threshold::new(self.reveal.threshold)
    }

    pub fn content_path(&self) -> Option<PathBuf> {
        self.content_path.as_deref().map(expand_path)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        match self.log.file.as_deref() {
            Some(path) => Some(expand_path(path)),
            None => get_user_config_path().map(|p| p.with_file_name("folio.log")),
        }
    }

    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.timing.scroll_throttle_ms)
    }

    pub fn pointer_throttle(&self) -> Duration {
        Duration::from_millis(self.timing.pointer_throttle_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.timing.resize_debounce_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.timing.tick_ms.max(1))
    }

    pub fn smooth_scroll(&self) -> Duration {
        if self.motion.reduced {
            Duration::ZERO
        } else {
            Duration::from_millis(self.motion.smooth_scroll_ms)
        }
    }

    /// Reveal animations need observation; reduced motion shows everything at once.
    pub fn reveal_available(&self) -> bool {
        self.reveal.enabled && !self.motion.reduced
    }
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("folio");
    path.push("folio.toml");
    Some(path)
}

fn ensure_user_config(path: &Path) {
    if path.exists() {
        return;
    }
    let written = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(path, BLUEPRINT));
    if let Err(err) = written {
        // logging is not up yet; the defaults still apply
        eprintln!("folio: could not create {}: {err}", path.display());
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
