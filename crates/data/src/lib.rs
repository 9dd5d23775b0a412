//! Persistence and ingestion for the vault analytics service.
//!
//! This crate provides the I/O-backed implementations of the analytics
//! capabilities:
//! - A Postgres-backed APY state store (repository pattern, upsert
//!   semantics)
//! - An HTTP TVL provider for pulling readings from a remote endpoint

/// TVL reading providers.
pub mod providers;
/// Repository implementations for database persistence.
pub mod repositories;
/// Store implementations over the repositories.
pub mod store;

pub use providers::HttpTvlSource;
pub use repositories::{ApyStateRecord, ApyStateRepository, Database};
pub use store::PostgresStateStore;
