//! Configuration loading for noip-update.

use crate::error::{Result, UpdateError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Run configuration, loaded once at startup.
///
/// Every key is optional in the file; anything missing keeps its empty
/// default and unknown keys are ignored. Keys are matched without regard
/// to case, so `NoipUrl`, `noipUrl` and `NOIPURL` are the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "KeyMap")]
pub struct Config {
    /// IP discovery endpoints, tried in order.
    pub urls: Vec<String>,

    /// Hostnames to update, in order.
    pub hostnames: Vec<String>,

    /// Dynamic DNS account username.
    pub noip_username: String,

    /// Dynamic DNS account password.
    pub noip_password: String,

    /// Update URL template with two `%s` slots: IP address, then hostname.
    pub noip_url: String,

    /// Administrator contact, sent in the user-agent.
    pub noip_admin_email: String,
}

/// Top-level object of a configuration file, keys as written.
#[derive(Deserialize)]
#[serde(transparent)]
struct KeyMap(serde_json::Map<String, serde_json::Value>);

/// Configuration keyed by lowercased names.
#[derive(Default, Deserialize)]
#[serde(default)]
struct FoldedConfig {
    urls: Vec<String>,
    hostnames: Vec<String>,
    noipusername: String,
    noippassword: String,
    noipurl: String,
    noipadminemail: String,
}

impl TryFrom<KeyMap> for Config {
    type Error = serde_json::Error;

    fn try_from(KeyMap(keys): KeyMap) -> std::result::Result<Self, Self::Error> {
        let folded = keys
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        let raw: FoldedConfig = serde_json::from_value(serde_json::Value::Object(folded))?;

        Ok(Self {
            urls: raw.urls,
            hostnames: raw.hostnames,
            noip_username: raw.noipusername,
            noip_password: raw.noippassword,
            noip_url: raw.noipurl,
            noip_admin_email: raw.noipadminemail,
        })
    }
}

/// On-disk format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(UpdateError::Config(
                "no configuration file given (use -c <FILE>)".to_string(),
            ));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            UpdateError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config = match Format::of(path) {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = match Format::of(path) {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration.
    pub fn example() -> Self {
        Self {
            urls: vec![
                "https://api.ipify.org".to_string(),
                "https://icanhazip.com".to_string(),
            ],
            hostnames: vec!["home.example.com".to_string()],
            noip_username: "user".to_string(),
            noip_password: "secret".to_string(),
            noip_url: "https://dynupdate.no-ip.com/nic/update?myip=%s&hostname=%s".to_string(),
            noip_admin_email: "admin@example.com".to_string(),
        }
    }
}
