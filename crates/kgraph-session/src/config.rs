//! Lifecycle limits for session graphs.

use std::time::Duration;

/// Default number of session graphs kept live at once.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Default idle TTL (none - a session graph lives until cleared or evicted).
pub const DEFAULT_TTL: Option<Duration> = None;

/// Lifecycle limits for [`GraphRegistry`](crate::GraphRegistry).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// How many session graphs may be live. Creating one more drops the
    /// graph whose session went longest without a turn or read.
    pub max_sessions: usize,

    /// Idle time after which a session graph is dropped, together with its
    /// triples and history. A later turn on the same ID starts a new graph.
    pub ttl: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            ttl: DEFAULT_TTL,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of live session graphs.
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }

    /// Drop session graphs idle for longer than `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Keep session graphs until they are cleared or evicted.
    pub fn without_ttl(mut self) -> Self {
        self.ttl = None;
        self
    }
}
