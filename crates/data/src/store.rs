//! Store implementations over the repositories.

use crate::repositories::ApyStateRepository;
use anyhow::Result;
use async_trait::async_trait;
use vault_analytics::{ApyState, ApyStateStore};

/// Postgres-backed [`ApyStateStore`].
///
/// Each `put` is a single upsert statement and therefore atomic, but the
/// surrounding get/observe/put sequence is not: deployments sharing a
/// session key across processes must serialize observations externally.
#[derive(Clone)]
pub struct PostgresStateStore {
    repository: ApyStateRepository,
}

impl PostgresStateStore {
    #[must_use]
    pub fn new(repository: ApyStateRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ApyStateStore for PostgresStateStore {
    async fn get(&self, key: &str) -> Result<Option<ApyState>> {
        let record = self.repository.find_by_key(key).await?;
        Ok(record.map(|r| r.to_state()))
    }

    async fn put(&self, key: &str, state: ApyState) -> Result<()> {
        self.repository.upsert(key, &state).await?;
        Ok(())
    }
}
