//! # noip-update
//!
//! Pushes the machine's current public IP address to a no-ip style dynamic
//! DNS service.
//!
//! A run asks a list of "what is my IP" endpoints for the address, stopping
//! at the first one that answers, then sends one authenticated update
//! request per configured hostname. Everything is logged to
//! `update-noip.log`. Periodic execution is left to cron or a similar
//! scheduler.
//!
//! ## Usage
//!
//! ```bash
//! noip-update -c /etc/noip-update.json
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod logging;
pub mod runner;
pub mod updater;


pub use config::Config;
pub use detector::IpDetector;
pub use error::{Result, UpdateError};
pub use runner::{run, UpdateOutcome};
pub use updater::Updater;
