//! Logger setup for the contact-scout binary.
//!
//! The terminal logger writes to stderr so it never interleaves with the
//! rendered screen on stdout.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogDestination {
    /// Write to the configured log file.
    File,
    /// Write to the terminal (stderr).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Installs the global logger. Fails if the log file cannot be created or a
/// logger is already set.
pub fn initialize(destination: LogDestination, log_path: &Path, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => vec![create_file_logger(level, config, log_path)?],
        LogDestination::Terminal => vec![create_term_logger(level, config)],
        LogDestination::Both => vec![
            create_term_logger(level, config.clone()),
            create_file_logger(level, config, log_path)?,
        ],
    };

    CombinedLogger::init(loggers).context("installing logger")
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("hyper")
        .build()
}

fn create_term_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> anyhow::Result<Box<dyn SharedLogger>> {
    let file = File::create(log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;
    let logger: Box<dyn SharedLogger> = WriteLogger::new(level, config, file);
    Ok(logger)
}
