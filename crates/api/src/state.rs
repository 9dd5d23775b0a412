//! Application state shared across handlers.

use std::sync::Arc;
use vault_analytics::{ApyService, DEFAULT_SESSION_KEY};

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The sampling service.
    pub apy: Arc<ApyService>,
    /// Session key the HTTP surface reads under.
    pub session_key: String,
}

impl AppState {
    /// Creates application state reading under the shared session key.
    pub fn new(apy: Arc<ApyService>) -> Self {
        Self {
            apy,
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Overrides the session key.
    #[must_use]
    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = session_key.into();
        self
    }
}
