//! noip-update - dynamic DNS updater meant to be run from cron.

use clap::Parser;
use noip_update::logging::{self, LOG_FILE};
use noip_update::runner;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "noip-update")]
#[command(about = "Push the current public IP address to a dynamic DNS service")]
#[command(version)]
struct Cli {
    /// Location of the configuration file (JSON, or TOML with a .toml extension)
    #[arg(short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log = match logging::init(Path::new(LOG_FILE)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: cannot open {}: {}", LOG_FILE, e);
            return ExitCode::FAILURE;
        }
    };

    let config_path = cli.config.unwrap_or_default();
    ExitCode::from(runner::execute(&config_path).await)
}
