//! Public IP detection.

use crate::config::Config;
use crate::error::Result;
use crate::updater::parse_url;
use reqwest::StatusCode;

/// IP detector with multiple fallback services.
pub struct IpDetector {
    client: reqwest::Client,
    services: Vec<String>,
}

impl IpDetector {
    /// Create a new IP detector with custom services.
    pub fn with_services(client: reqwest::Client, services: Vec<String>) -> Self {
        Self { client, services }
    }

    /// Create an IP detector using the discovery endpoints in `config`.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::with_services(client, config.urls.clone())
    }

    /// Ask each service in turn for the public address.
    ///
    /// The first service answering `200 OK` ends the search and later
    /// services are never contacted. Returns `None` when every service
    /// failed, or when the answering service sent a blank body. A service
    /// URL that does not parse is an error.
    pub async fn detect(&self) -> Result<Option<String>> {
        for service in &self.services {
            tracing::info!("Retrieving IP address from: {}", service);
            if let Some(ip) = self.try_service(service).await? {
                if ip.is_empty() {
                    tracing::warn!("Empty response from {}", service);
                    return Ok(None);
                }
                tracing::info!("IP address: {}", ip);
                return Ok(Some(ip));
            }
        }

        Ok(None)
    }

    /// Try a single IP detection service; `Some` is the trimmed body of a
    /// `200 OK`, possibly empty.
    async fn try_service(&self, service: &str) -> Result<Option<String>> {
        let url = parse_url(service)?;

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("No response from {}: {}", service, e);
                return Ok(None);
            }
        };

        if response.status() != StatusCode::OK {
            tracing::warn!("HTTP {} from {}", response.status(), service);
            return Ok(None);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read response from {}: {}", service, e);
                return Ok(None);
            }
        };

        Ok(Some(text.trim().to_string()))
    }
}
