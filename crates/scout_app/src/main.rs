mod platform;

use std::path::PathBuf;

use clap::Parser;

use platform::logging::LogDestination;

/// Terminal front end for collecting analyst contacts through remote agents.
#[derive(Debug, Parser)]
#[command(name = "contact-scout", version, about)]
pub struct Cli {
    /// RON configuration file; a missing file means defaults.
    #[arg(long, default_value = "contact_scout.ron")]
    config: PathBuf,

    /// Backend base URL, overriding the configuration file.
    #[arg(long)]
    base_url: Option<String>,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::run_app(cli)
}
