//! Log file setup.
//!
//! Nothing is written to stdout or stderr during a run; every message goes
//! through the subscriber built here. `main` points it at the update log,
//! tests point it at an in-memory buffer.

use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Log file, relative to the working directory.
pub const LOG_FILE: &str = "update-noip.log";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Local wall-clock timestamps, `2024/01/31 13:05:09`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format(TIMESTAMP_FORMAT))
    }
}

/// Build a subscriber writing plain, timestamped lines to `writer`.
pub fn subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalTimestamp)
        .with_max_level(LevelFilter::INFO)
        .finish()
}

/// Keeps the log file installed; the file is closed when this is dropped.
#[must_use = "logging stops when the guard is dropped"]
pub struct LogGuard {
    _default: DefaultGuard,
}

/// Open `path` for appending (creating it if needed) and route this
/// thread's logging into it.
pub fn init(path: &Path) -> Result<LogGuard> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let guard = tracing::subscriber::set_default(subscriber(Mutex::new(file)));
    Ok(LogGuard { _default: guard })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_file_is_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);

        {
            let _guard = init(&path).unwrap();
            tracing::info!("first run");
        }
        {
            let _guard = init(&path).unwrap();
            tracing::info!("second run");
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first run"));
        assert!(lines[1].ends_with("second run"));
    }

    #[test]
    fn test_debug_is_filtered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);

        {
            let _guard = init(&path).unwrap();
            tracing::debug!("hidden");
            tracing::warn!("shown");
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("shown"));
    }

    #[test]
    fn test_timestamp_format() {
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        assert!(chrono::NaiveDateTime::parse_from_str(&now, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(now.len(), "2024/01/31 13:05:09".len());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join(LOG_FILE);
        assert!(init(&path).is_err());
    }
}
