//! TVL reading sources.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One reading of the vault's total value locked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TvlReading {
    /// Aggregate assets held by the vault.
    pub tvl: f64,
    /// Seconds since epoch.
    pub timestamp: i64,
}

/// Supplies the current TVL and timestamp on each call.
///
/// The estimator does not fetch these itself; the host application wires
/// in a source (fixed value, HTTP endpoint, on-chain aggregate).
#[async_trait]
pub trait TvlSource: Send + Sync {
    async fn read(&self) -> Result<TvlReading>;
}

/// A source returning a fixed TVL stamped with the system clock.
#[derive(Debug, Clone, Copy)]
pub struct StaticTvlSource {
    tvl: f64,
}

impl StaticTvlSource {
    pub fn new(tvl: f64) -> Self {
        Self { tvl }
    }
}

#[async_trait]
impl TvlSource for StaticTvlSource {
    async fn read(&self) -> Result<TvlReading> {
        Ok(TvlReading {
            tvl: self.tvl,
            timestamp: unix_now(),
        })
    }
}

/// Seconds since epoch from the system clock.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
