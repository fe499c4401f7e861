//! Dynamic DNS updates.

use crate::config::Config;
use crate::error::{Result, UpdateError};
use reqwest::{StatusCode, Url};

/// Version advertised in the user-agent.
pub const USER_AGENT_VERSION: u32 = 2;

/// User-agent sent with every request, discovery and update alike.
pub fn user_agent(admin_email: &str) -> String {
    format!("noip-update-madeye.com/{} {}", USER_AGENT_VERSION, admin_email)
}

/// Build the HTTP client shared by the resolver and the updater.
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent(&config.noip_admin_email))
        .build()?;
    Ok(client)
}

/// Parse a URL, mapping failures to a fatal error.
pub(crate) fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| UpdateError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Fill the `%s` slots of `template` with `args`, in order.
///
/// `%%` is a literal percent sign. Other `%` sequences are copied as they
/// are, so percent-encoded text in the template survives. Slots without a
/// value stay as `%s`; both kinds of mismatch are logged.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let extra: usize = args.iter().map(|a| a.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    let mut unfilled = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => match args.next() {
                Some(arg) => {
                    chars.next();
                    out.push_str(arg);
                }
                None => {
                    unfilled += 1;
                    out.push(c);
                }
            },
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push(c),
        }
    }

    if unfilled > 0 {
        tracing::warn!(
            "Template {:?} has {} %s slot(s) without a value",
            template,
            unfilled
        );
    }

    let unused = args.count();
    if unused > 0 {
        tracing::warn!(
            "Template {:?} has {} value(s) without a %s slot",
            template,
            unused
        );
    }

    out
}

/// Sends authenticated update requests for single hostnames.
pub struct Updater {
    client: reqwest::Client,
    template: String,
    username: String,
    password: String,
}

impl Updater {
    /// Create a new updater.
    pub fn new(
        client: reqwest::Client,
        template: String,
        username: String,
        password: String,
    ) -> Self {
        Self {
            client,
            template,
            username,
            password,
        }
    }

    /// Create an updater from the account settings in `config`.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.noip_url.clone(),
            config.noip_username.clone(),
            config.noip_password.clone(),
        )
    }

    /// Update URL for `ip` and `hostname`.
    pub fn update_url(&self, ip: &str, hostname: &str) -> Result<Url> {
        parse_url(&format_template(&self.template, &[ip, hostname]))
    }

    /// Point `hostname` at `ip`.
    ///
    /// Returns the trimmed provider response, or an empty string when the
    /// update failed. Only a malformed update URL is an error.
    pub async fn update(&self, ip: &str, hostname: &str) -> Result<String> {
        let url = self.update_url(ip, hostname)?;

        let response = match self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("No response updating {}: {}", hostname, e);
                return Ok(String::new());
            }
        };

        if response.status() != StatusCode::OK {
            tracing::warn!("Failed to update {}: {}", hostname, response.status());
            return Ok(String::new());
        }

        match response.text().await {
            Ok(body) => Ok(body.trim().to_string()),
            Err(e) => {
                tracing::warn!("Failed to read update response for {}: {}", hostname, e);
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        assert_eq!(
            user_agent("admin@example.com"),
            "noip-update-madeye.com/2 admin@example.com"
        );
    }

    #[test]
    fn test_template_ip_then_hostname() {
        let url = format_template(
            "https://dyn.example.com/nic/update?myip=%s&hostname=%s",
            &["9.9.9.9", "h.example.com"],
        );
        assert_eq!(
            url,
            "https://dyn.example.com/nic/update?myip=9.9.9.9&hostname=h.example.com"
        );
    }

    #[test]
    fn test_template_order_follows_slots() {
        let url = format_template("http://x/%s/%s", &["9.9.9.9", "h.example.com"]);
        assert_eq!(url, "http://x/9.9.9.9/h.example.com");
    }

    #[test]
    fn test_template_percent_escapes() {
        assert_eq!(format_template("100%% %s", &["a"]), "100% a");
        assert_eq!(format_template("a%40b?ip=%s", &["1.1.1.1"]), "a%40b?ip=1.1.1.1");
        assert_eq!(format_template("trailing%", &[]), "trailing%");
    }

    #[test]
    fn test_template_slot_count_mismatch() {
        assert_eq!(format_template("ip=%s", &["1.1.1.1", "h"]), "ip=1.1.1.1");
        assert_eq!(format_template("%s %s %s", &["a", "b"]), "a b %s");
    }

    #[test]
    fn test_update_url_from_config() {
        let config = Config {
            noip_url: "https://dyn.example.com/update?hostname=%s&myip=%s".to_string(),
            ..Config::default()
        };
        let updater = Updater::from_config(reqwest::Client::new(), &config);

        let url = updater.update_url("9.9.9.9", "h.example.com").unwrap();
        assert_eq!(url.query(), Some("hostname=9.9.9.9&myip=h.example.com"));
    }

    #[test]
    fn test_invalid_update_url() {
        let updater = Updater::new(
            reqwest::Client::new(),
            "not a url %s %s".to_string(),
            "u".to_string(),
            "p".to_string(),
        );
        assert!(matches!(
            updater.update_url("1.2.3.4", "h"),
            Err(UpdateError::InvalidUrl { .. })
        ));
    }
}
