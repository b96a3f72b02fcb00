//! Idle-time tracking for session expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tracks the last access of each session against an optional idle TTL.
///
/// The `*_at` variants take the current instant explicitly so callers that
/// already hold a timestamp (and tests) don't re-read the clock.
#[derive(Debug)]
pub struct TtlTracker {
    last_access: HashMap<String, Instant>,
    ttl: Option<Duration>,
}

impl TtlTracker {
    /// Create a tracker; `None` disables expiry.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            last_access: HashMap::new(),
            ttl,
        }
    }

    /// Record an access now.
    pub fn touch(&mut self, session_id: &str) {
        self.touch_at(session_id, Instant::now());
    }

    /// Record an access at `at`.
    pub fn touch_at(&mut self, session_id: &str, at: Instant) {
        match self.last_access.get_mut(session_id) {
            Some(last) => *last = at,
            None => {
                self.last_access.insert(session_id.to_string(), at);
            }
        }
    }

    /// Whether the session has been idle longer than the TTL.
    pub fn is_expired(&self, session_id: &str) -> bool {
        self.is_expired_at(session_id, Instant::now())
    }

    /// Whether the session has been idle longer than the TTL as of `now`.
    ///
    /// Untracked sessions never expire; the registry only asks about sessions
    /// it holds.
    pub fn is_expired_at(&self, session_id: &str, now: Instant) -> bool {
        match (self.ttl, self.last_access.get(session_id)) {
            (Some(ttl), Some(last)) => now.saturating_duration_since(*last) > ttl,
            _ => false,
        }
    }

    /// Stop tracking a session.
    pub fn remove(&mut self, session_id: &str) {
        self.last_access.remove(session_id);
    }

    /// Remove every expired entry as of `now` and return their IDs.
    pub fn drain_expired_at(&mut self, now: Instant) -> Vec<String> {
        let Some(ttl) = self.ttl else {
            return Vec::new();
        };
        let expired: Vec<String> = self
            .last_access
            .iter()
            .filter(|(_, last)| now.saturating_duration_since(**last) > ttl)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            self.last_access.remove(id);
        }
        expired
    }

    /// Number of tracked sessions.
    pub fn len(&self) -> usize {
        self.last_access.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.last_access.is_empty()
    }

    /// The configured TTL.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}
