//! Blocking HTTP client used by both scraping stages

use std::time::Duration;

use crate::error::{Result, ScrapeError};

/// Create an HTTP client with browser-like headers. basketball-reference
/// serves plain HTML but rejects default library user agents.
pub fn create_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(ScrapeError::Client)
}

/// Fetch a page body. Non-2xx statuses become typed errors so callers can
/// tell a missing month page (404) from a transport failure.
pub fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Http {
            url: url.to_string(),
            status,
        });
    }

    response.text().map_err(|e| ScrapeError::Network {
        url: url.to_string(),
        source: e,
    })
}
