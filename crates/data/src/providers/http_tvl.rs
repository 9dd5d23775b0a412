//! HTTP TVL provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use vault_analytics::{TvlReading, TvlSource, unix_now};

/// Pulls TVL readings from a JSON endpoint.
///
/// Expects a body of the shape `{"tvl": <number>, "timestamp": <seconds>}`;
/// the timestamp is optional and defaults to the local clock, since most
/// aggregators report only the current value.
pub struct HttpTvlSource {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct TvlPayload {
    tvl: f64,
    timestamp: Option<i64>,
}

impl HttpTvlSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl TvlSource for HttpTvlSource {
    async fn read(&self) -> Result<TvlReading> {
        let payload: TvlPayload = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("TVL request to {} failed", self.url))?
            .json()
            .await
            .context("TVL response was not valid JSON")?;

        let reading = TvlReading {
            tvl: payload.tvl,
            timestamp: payload.timestamp.unwrap_or_else(unix_now),
        };
        debug!(url = %self.url, tvl = reading.tvl, "fetched TVL reading");
        Ok(reading)
    }
}
