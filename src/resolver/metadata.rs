//! Instance metadata probe.
//!
//! Asks the link-local metadata service for the availability zone and
//! derives the region from it. Every failure is silent: off-cloud hosts
//! simply have no metadata service.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::config::ResolverConfig;

/// Fetches the availability zone from the instance metadata endpoint.
pub struct MetadataProbe {
    client: Option<Client>,
    url: String,
}

impl MetadataProbe {
    /// Create a probe for `url` with the given connect and overall timeouts.
    pub fn new(url: impl Into<String>, connect_timeout: Duration, max_time: Duration) -> Self {
        let client = Client::builder()
            .user_agent("cloudctx")
            .connect_timeout(connect_timeout)
            .timeout(max_time)
            .no_proxy()
            .build()
            .map_err(|e| tracing::debug!("Metadata client unavailable: {}", e))
            .ok();

        Self {
            client,
            url: url.into(),
        }
    }

    /// Create a probe from the resolver configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(
            config.metadata_url.clone(),
            config.connect_timeout(),
            config.max_time(),
        )
    }

    /// Fetch the availability zone, or `None` on any failure.
    pub fn availability_zone(&self) -> Option<String> {
        match self.fetch() {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Metadata probe found nothing: {:#}", e);
                None
            }
        }
    }

    /// Fetch the region derived from the availability zone.
    pub fn region(&self) -> Option<String> {
        self.availability_zone()
            .as_deref()
            .and_then(region_from_availability_zone)
    }

    fn fetch(&self) -> Result<String> {
        let Some(client) = &self.client else {
            bail!("no HTTP client");
        };

        let response = client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to fetch {}", self.url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), self.url);
        }

        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {}", self.url))?;

        if body.trim().is_empty() {
            bail!("empty response from {}", self.url);
        }

        Ok(body)
    }
}

/// Derive a region from an availability zone by dropping the zone letter.
///
/// Whitespace is trimmed first, then exactly one trailing character is
/// removed. Returns `None` if nothing is left.
///
/// # Example
///
/// ```
/// use cloudctx::resolver::region_from_availability_zone;
///
/// assert_eq!(region_from_availability_zone("us-east-1a\n").as_deref(), Some("us-east-1"));
/// assert_eq!(region_from_availability_zone("a"), None);
/// ```
pub fn region_from_availability_zone(az: &str) -> Option<String> {
    let mut region = az.trim().to_string();
    region.pop();
    if region.is_empty() {
        None
    } else {
        Some(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn probe_for(url: String) -> MetadataProbe {
        MetadataProbe::new(url, Duration::from_secs(5), Duration::from_secs(3))
    }

    #[test]
    fn drops_zone_letter() {
        assert_eq!(
            region_from_availability_zone("us-east-1a").as_deref(),
            Some("us-east-1")
        );
        assert_eq!(
            region_from_availability_zone("eu-west-2c\n").as_deref(),
            Some("eu-west-2")
        );
    }

    #[test]
    fn single_character_zone_yields_nothing() {
        assert_eq!(region_from_availability_zone("a"), None);
        assert_eq!(region_from_availability_zone("  \n"), None);
    }

    #[test]
    fn fetches_region_from_endpoint() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/latest/meta-data/placement/availability-zone");
            then.status(200).body("ap-southeast-2b");
        });

        let probe = probe_for(server.url("/latest/meta-data/placement/availability-zone"));
        assert_eq!(probe.region().as_deref(), Some("ap-southeast-2"));
        mock.assert();
    }

    #[test]
    fn non_success_status_yields_nothing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/az");
            then.status(404).body("us-east-1a");
        });

        let probe = probe_for(server.url("/az"));
        assert!(probe.availability_zone().is_none());
    }

    #[test]
    fn empty_body_yields_nothing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/az");
            then.status(200).body("\n");
        });

        let probe = probe_for(server.url("/az"));
        assert!(probe.region().is_none());
    }

    #[test]
    fn unreachable_endpoint_yields_nothing() {
        let probe = MetadataProbe::new(
            "http://127.0.0.1:1/az",
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert!(probe.region().is_none());
    }

    #[test]
    fn slow_endpoint_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/az");
            then.status(200)
                .body("us-east-1a")
                .delay(Duration::from_millis(1500));
        });

        let probe = MetadataProbe::new(
            server.url("/az"),
            Duration::from_secs(5),
            Duration::from_millis(200),
        );
        assert!(probe.region().is_none());
    }
}
