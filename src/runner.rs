//! One update run: detect the address, then update every hostname.

use crate::config::Config;
use crate::detector::IpDetector;
use crate::error::{Result, UpdateError};
use crate::updater::{http_client, Updater};
use anyhow::Context;
use std::path::Path;

/// Exit status of a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status after a fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// Provider response for one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Hostname that was updated.
    pub hostname: String,
    /// Trimmed provider response; empty when the update failed.
    pub response: String,
}

/// Run a full update for `config`.
///
/// Hostnames are updated one after the other, and a failed update never
/// stops the next one. Fails with [`UpdateError::NoIpAddress`] when no
/// discovery endpoint produced an address.
pub async fn run(config: &Config) -> Result<Vec<UpdateOutcome>> {
    let client = http_client(config)?;

    let ip = IpDetector::from_config(client.clone(), config)
        .detect()
        .await?
        .ok_or(UpdateError::NoIpAddress)?;

    let updater = Updater::from_config(client, config);
    let mut outcomes = Vec::with_capacity(config.hostnames.len());

    for hostname in &config.hostnames {
        let response = updater.update(&ip, hostname).await?;
        tracing::info!("{} => {}", hostname, response);
        outcomes.push(UpdateOutcome {
            hostname: hostname.clone(),
            response,
        });
    }

    Ok(outcomes)
}

/// Load the configuration at `config_path` and run it.
///
/// A fatal error is logged here and turned into [`EXIT_FAILURE`]; the
/// caller only has to hand the status to the process.
pub async fn execute(config_path: &Path) -> u8 {
    match load_and_run(config_path).await {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

async fn load_and_run(config_path: &Path) -> anyhow::Result<Vec<UpdateOutcome>> {
    let config = Config::load_from(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    Ok(run(&config).await?)
}
