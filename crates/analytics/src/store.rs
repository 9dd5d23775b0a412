//! Persisted APY state stores.
//!
//! The estimator never owns its state: a store capability is injected so
//! the host application picks the persistence (in-memory map, external
//! cache, database row) and is responsible for serializing updates per
//! session key.

use crate::apy::ApyState;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key-value persistence for [`ApyState`] records, keyed by an opaque
/// session identifier.
#[async_trait]
pub trait ApyStateStore: Send + Sync {
    /// Loads the state for a session key, if any was recorded.
    async fn get(&self, key: &str) -> Result<Option<ApyState>>;

    /// Overwrites the state for a session key.
    async fn put(&self, key: &str, state: ApyState) -> Result<()>;
}

/// In-memory store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: RwLock<HashMap<String, ApyState>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApyStateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<ApyState>> {
        Ok(self.entries.read().await.get(key).copied())
    }

    async fn put(&self, key: &str, state: ApyState) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), state);
        Ok(())
    }
}
