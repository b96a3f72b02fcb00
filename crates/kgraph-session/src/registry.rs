//! Session registry with per-session locking, LRU eviction and TTL support.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, trace};

use kgraph_types::{GraphStats, SessionSnapshot, Triple};

use crate::config::RegistryConfig;
use crate::error::{GraphError, Result};
use crate::export::{ExportFormat, ExportPayload};
use crate::graph::SessionGraph;
use crate::ttl::TtlTracker;
use crate::validation::validate_session_id;

/// A session's graph behind its own lock.
///
/// `retired` is set once the slot has left the map (clear, eviction or
/// expiry). Writers that observe it go back to the map for a fresh slot.
#[derive(Debug)]
struct Slot {
    retired: bool,
    graph: SessionGraph,
}

type SlotRef = Arc<Mutex<Slot>>;

struct RegistryInner {
    sessions: LruCache<String, SlotRef>,
    ttl: TtlTracker,
}

impl RegistryInner {
    /// Pop the session if its TTL has lapsed, handing the slot to `dropped`.
    fn expire_if_stale(&mut self, session_id: &str, now: Instant, dropped: &mut Vec<SlotRef>) {
        if !self.ttl.is_expired_at(session_id, now) {
            return;
        }
        debug!(session_id = %session_id, "Session expired, dropping");
        self.ttl.remove(session_id);
        if let Some(slot) = self.sessions.pop(session_id) {
            dropped.push(slot);
        }
    }
}

/// Result of a successful [`GraphRegistry::append`].
#[derive(Debug, Clone, Serialize)]
pub struct AppendOutcome {
    pub session_id: String,
    /// Triples that were new to the session, in input order.
    pub accepted: Vec<Triple>,
    /// Session counters after the append.
    pub stats: GraphStats,
    /// Whether this append created the session.
    pub created: bool,
}

/// Registry-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub sessions: usize,
    pub capacity: usize,
    pub ttl_tracked: usize,
}

/// Maps session IDs to their graphs.
///
/// The map lock is only held to look up, insert or evict a slot; graph
/// mutation happens under the slot's own lock so different sessions never
/// block each other. Lock order is always map then slot.
///
/// Cloning is cheap and every clone shares the same sessions.
#[derive(Clone)]
pub struct GraphRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    config: RegistryConfig,
}

impl Default for GraphRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl std::fmt::Debug for GraphRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphRegistry")
            .field("config", &self.config)
            .field("sessions", &self.len())
            .finish()
    }
}

impl GraphRegistry {
    /// Create an empty registry.
    ///
    /// A `max_sessions` of zero is treated as one.
    pub fn new(config: RegistryConfig) -> Self {
        let cap = NonZeroUsize::new(config.max_sessions).unwrap_or(NonZeroUsize::MIN);
        let inner = RegistryInner {
            sessions: LruCache::new(cap),
            ttl: TtlTracker::new(config.ttl),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Look up a live session, refreshing its LRU position and TTL.
    fn find(&self, session_id: &str) -> Option<SlotRef> {
        let now = Instant::now();
        let mut dropped = Vec::new();
        let found = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            inner.expire_if_stale(session_id, now, &mut dropped);
            let found = inner.sessions.get(session_id).map(Arc::clone);
            if found.is_some() {
                inner.ttl.touch_at(session_id, now);
            }
            found
        };
        retire(dropped);
        found
    }

    /// Like [`find`](Self::find) but creates the session when missing.
    fn find_or_create(&self, session_id: &str) -> (SlotRef, bool) {
        let now = Instant::now();
        let mut dropped = Vec::new();
        let found = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            inner.expire_if_stale(session_id, now, &mut dropped);

            let found = match inner.sessions.get(session_id) {
                Some(slot) => (Arc::clone(slot), false),
                None => {
                    let slot = Arc::new(Mutex::new(Slot {
                        retired: false,
                        graph: SessionGraph::new(session_id),
                    }));
                    if let Some((evicted_id, evicted)) =
                        inner.sessions.push(session_id.to_string(), Arc::clone(&slot))
                    {
                        debug!(session_id = %evicted_id, "Evicting LRU session to make room");
                        inner.ttl.remove(&evicted_id);
                        dropped.push(evicted);
                    }
                    (slot, true)
                }
            };
            inner.ttl.touch_at(session_id, now);
            found
        };
        retire(dropped);
        found
    }

    /// Record a turn and merge its triples into the session, creating it on
    /// first use.
    pub fn append(
        &self,
        session_id: &str,
        question: &str,
        answer: &str,
        triples: &[Triple],
    ) -> Result<AppendOutcome> {
        validate_session_id(session_id)?;

        loop {
            let (slot, created) = self.find_or_create(session_id);
            let mut entry = slot.lock();
            if entry.retired {
                trace!(session_id = %session_id, "Slot retired mid-append, retrying");
                continue;
            }

            let accepted = entry.graph.append(question, answer, triples);
            let stats = entry.graph.stats();
            drop(entry);

            if created {
                info!(session_id = %session_id, "Session created");
            }
            debug!(
                session_id = %session_id,
                offered = triples.len(),
                accepted = accepted.len(),
                total_triples = stats.total_triples,
                "Turn appended"
            );

            return Ok(AppendOutcome {
                session_id: session_id.to_string(),
                accepted,
                stats,
                created,
            });
        }
    }

    /// Run `f` against a live session's graph.
    fn with_graph<T>(&self, session_id: &str, f: impl FnOnce(&SessionGraph) -> T) -> Result<T> {
        validate_session_id(session_id)?;
        let not_found = || GraphError::SessionNotFound(session_id.to_string());
        let slot = self.find(session_id).ok_or_else(not_found)?;
        let entry = slot.lock();
        if entry.retired {
            return Err(not_found());
        }
        Ok(f(&entry.graph))
    }

    /// Snapshot a session. Never creates state.
    pub fn get(&self, session_id: &str) -> Result<SessionSnapshot> {
        self.with_graph(session_id, SessionGraph::snapshot)
    }

    /// Counters for one session.
    pub fn session_stats(&self, session_id: &str) -> Result<GraphStats> {
        self.with_graph(session_id, SessionGraph::stats)
    }

    /// Render a session in `format`.
    pub fn export(&self, session_id: &str, format: ExportFormat) -> Result<ExportPayload> {
        let payload = self.with_graph(session_id, |graph| ExportPayload::build(graph, format))?;
        debug!(session_id = %session_id, format = %format, "Session exported");
        Ok(payload)
    }

    /// Drop a session. Returns whether a live session was removed; an
    /// unknown ID is `Ok(false)`.
    pub fn clear(&self, session_id: &str) -> Result<bool> {
        validate_session_id(session_id)?;
        let now = Instant::now();
        let mut dropped = Vec::new();
        let removed = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            inner.expire_if_stale(session_id, now, &mut dropped);
            inner.ttl.remove(session_id);
            inner.sessions.pop(session_id)
        };
        retire(dropped);

        match removed {
            Some(slot) => {
                slot.lock().retired = true;
                info!(session_id = %session_id, "Session cleared");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether a live session exists. Does not count as an access.
    pub fn contains(&self, session_id: &str) -> bool {
        let inner = self.inner.lock();
        inner.sessions.contains(session_id) && !inner.ttl.is_expired(session_id)
    }

    /// IDs of live sessions, most recently used first.
    pub fn session_ids(&self) -> Vec<String> {
        let now = Instant::now();
        let inner = self.inner.lock();
        inner
            .sessions
            .iter()
            .filter(|(id, _)| !inner.ttl.is_expired_at(id, now))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Number of sessions held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().sessions.is_empty()
    }

    /// Drop every session whose TTL has lapsed. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let dropped: Vec<SlotRef> = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            inner
                .ttl
                .drain_expired_at(now)
                .iter()
                .filter_map(|id| inner.sessions.pop(id))
                .collect()
        };
        let count = dropped.len();
        retire(dropped);
        if count > 0 {
            info!(count, "Purged expired sessions");
        }
        count
    }

    pub fn stats(&self) -> RegistryStats {
        let inner = self.inner.lock();
        RegistryStats {
            sessions: inner.sessions.len(),
            capacity: inner.sessions.cap().get(),
            ttl_tracked: inner.ttl.len(),
        }
    }
}

/// Mark slots that left the map. Called with the map lock released.
fn retire(slots: Vec<SlotRef>) {
    for slot in slots {
        slot.lock().retired = true;
    }
}
