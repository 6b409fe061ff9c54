use std::{fs::File, path::Path};

use anyhow::Context;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use super::config::Settings;

pub const DEFAULT_LOG_FILE: &str = "snek.log";

pub fn level(settings: &Settings) -> LevelFilter {
    match (settings.quiet, settings.verbose) {
        (true, _) => LevelFilter::Off,
        (false, true) => LevelFilter::Debug,
        (false, false) => LevelFilter::Info,
    }
}

/// Installs the global logger.
///
/// The terminal front end owns stdout and stderr, so console modes log to a
/// file instead.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let level = level(settings);

    if level == LevelFilter::Off {
        return Ok(());
    }

    if settings.mode.is_con() || settings.log_file.is_some() {
        let path = settings
            .log_file
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_LOG_FILE));

        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;

        WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    } else {
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
        .context("Failed to initialize logger")?;
    }

    Ok(())
}
