//! The sampling service: store + source wired around the estimator.

use crate::apy::{ApyEstimate, observe};
use crate::source::TvlSource;
use crate::store::ApyStateStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Session key used when the host application does not partition state.
pub const DEFAULT_SESSION_KEY: &str = "vault_apy_shared";

/// Computes APY estimates against a persisted per-session state.
///
/// The read-modify-write against the store is serialized by an internal
/// lock, so at most one observation per service instance is in flight.
/// Deployments sharing a session key across processes must serialize in
/// the store itself; this service makes no cross-process guarantee.
pub struct ApyService {
    store: Arc<dyn ApyStateStore>,
    source: Arc<dyn TvlSource>,
    gate: Mutex<()>,
}

impl ApyService {
    pub fn new(store: Arc<dyn ApyStateStore>, source: Arc<dyn TvlSource>) -> Self {
        Self {
            store,
            source,
            gate: Mutex::new(()),
        }
    }

    /// Reads the source, folds the reading into the session's state and
    /// persists the result.
    ///
    /// # Errors
    ///
    /// Propagates store and source I/O failures. The estimator itself
    /// never fails.
    pub async fn sample(&self, session_key: &str) -> Result<ApyEstimate> {
        let _guard = self.gate.lock().await;

        let reading = self.source.read().await?;
        let mut state = self.store.get(session_key).await?.unwrap_or_default();
        let before = state;

        let estimate = observe(reading.tvl, reading.timestamp, &mut state);

        // A non-advancing sample leaves the state untouched; skip the write.
        if state != before {
            self.store.put(session_key, state).await?;
        }

        debug!(
            session_key,
            tvl = estimate.tvl,
            apy = estimate.apy,
            "APY sample computed"
        );
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TvlReading;
    use crate::store::InMemoryStateStore;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Replays a fixed sequence of readings.
    struct ScriptedSource {
        readings: Mutex<VecDeque<TvlReading>>,
    }

    impl ScriptedSource {
        fn new(readings: impl IntoIterator<Item = (f64, i64)>) -> Self {
            Self {
                readings: Mutex::new(
                    readings
                        .into_iter()
                        .map(|(tvl, timestamp)| TvlReading { tvl, timestamp })
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl TvlSource for ScriptedSource {
        async fn read(&self) -> Result<TvlReading> {
            self.readings
                .lock()
                .await
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    #[tokio::test]
    async fn test_samples_prime_then_estimate() {
        let store = Arc::new(InMemoryStateStore::new());
        let source = Arc::new(ScriptedSource::new([
            (1000.0, 0),
            (1010.0, 86_400),
            (1010.0, 86_400), // non-advancing repeat
        ]));
        let service = ApyService::new(store.clone(), source);

        let first = service.sample("vault").await.unwrap();
        assert_eq!(first.apy, 0.0);
        assert_eq!(first.readable, "0%");

        let second = service.sample("vault").await.unwrap();
        assert!((second.apy - 365.0).abs() < 1e-9);
        assert_eq!(second.dt, Some(86_400));

        // Repeat with the same timestamp echoes the estimate and keeps
        // the stored state at the second reading.
        let third = service.sample("vault").await.unwrap();
        assert!((third.apy - 365.0).abs() < 1e-9);
        let state = store.get("vault").await.unwrap().unwrap();
        assert_eq!(state.last_tvl, Some(1010.0));
        assert_eq!(state.last_timestamp, Some(86_400));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let store = Arc::new(InMemoryStateStore::new());
        let source = Arc::new(ScriptedSource::new([]));
        let service = ApyService::new(store, source);
        assert!(service.sample("vault").await.is_err());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = Arc::new(InMemoryStateStore::new());
        let source = Arc::new(ScriptedSource::new([(1000.0, 0), (2000.0, 0)]));
        let service = ApyService::new(store, source);

        let a = service.sample("vault-a").await.unwrap();
        let b = service.sample("vault-b").await.unwrap();
        // Both are first observations for their own key.
        assert_eq!(a.apy, 0.0);
        assert_eq!(b.apy, 0.0);
        assert_eq!(b.tvl, 2000.0);
    }
}
