//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types from the crate.

pub use crate::apy::{ApyEstimate, ApyState, SECONDS_PER_YEAR, observe};
pub use crate::service::{ApyService, DEFAULT_SESSION_KEY};
pub use crate::source::{StaticTvlSource, TvlReading, TvlSource, unix_now};
pub use crate::store::{ApyStateStore, InMemoryStateStore};
