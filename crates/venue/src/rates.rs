//! Fiat exchange-rate lookups for cross-currency normalization.

use crate::error::VenueError;
use async_trait::async_trait;
use peerscout_core::Fiat;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Exchange-rate seam. The rate multiplies a `from`-denominated value into
/// `to`. `None` means the rate is unavailable right now; callers must treat
/// that as degraded, never as an error.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn rate(&self, from: Fiat, to: Fiat) -> Option<f64>;
}

/// Rate client for the open.er-api.com public feed.
pub struct OpenErApi {
    client: reqwest::Client,
    base_url: String,
}

impl OpenErApi {
    const DEFAULT_BASE_URL: &'static str = "https://open.er-api.com/v6";
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Result<Self, VenueError> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Point the client at a different host (tests, mirrors).
    pub fn with_base_url(base_url: &str) -> Result<Self, VenueError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn latest(&self, base: Fiat) -> Result<RatesResponse, VenueError> {
        let url = format!("{}/latest/{}", self.base_url, base.as_str());
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(VenueError::Status(response.status().as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| VenueError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RateSource for OpenErApi {
    async fn rate(&self, from: Fiat, to: Fiat) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }

        match self.latest(from).await {
            Ok(body) => {
                if let Some(rate) = body.rates.get(to.as_str()).copied() {
                    if rate > 0.0 {
                        return Some(rate);
                    }
                }
            }
            Err(err) => warn!(
                from = from.as_str(),
                to = to.as_str(),
                error = %err,
                "forward rate lookup failed"
            ),
        }

        // The feed drops some bases; the inverse table usually still has them.
        match self.latest(to).await {
            Ok(body) => body
                .rates
                .get(from.as_str())
                .copied()
                .filter(|rate| *rate > 0.0)
                .map(|rate| 1.0 / rate),
            Err(err) => {
                warn!(
                    from = from.as_str(),
                    to = to.as_str(),
                    error = %err,
                    "inverse rate lookup failed"
                );
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}
