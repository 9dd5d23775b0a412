//! APY estimation for a DeFi vault.
//!
//! This crate provides the yield analytics pipeline:
//! - The APY state machine: TVL growth between two samples turned into an
//!   annualized percentage
//! - Capability traits for persisted state and TVL readings
//! - An in-memory state store for tests and single-process deployments
//! - The service that wires store and source together per session key

/// Prelude module for convenient imports.
pub mod prelude;

/// APY computation and persisted-state update rule.
pub mod apy;
/// The sampling service.
pub mod service;
/// TVL reading sources.
pub mod source;
/// Persisted APY state stores.
pub mod store;

pub use apy::{ApyEstimate, ApyState, SECONDS_PER_YEAR, observe};
pub use service::{ApyService, DEFAULT_SESSION_KEY};
pub use source::{StaticTvlSource, TvlReading, TvlSource, unix_now};
pub use store::{ApyStateStore, InMemoryStateStore};
