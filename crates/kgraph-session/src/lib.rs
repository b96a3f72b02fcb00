//! Session-scoped knowledge graphs.
//!
//! This crate accumulates extracted triples per conversation:
//! - [`SessionGraph`] deduplicates triples by (subject, predicate, object)
//!   and keeps the entity set equal to the union of triple endpoints
//! - [`GraphRegistry`] maps session IDs to graphs with per-session locking,
//!   LRU eviction and an optional idle TTL
//! - [`ExportPayload`] renders a session as JSON or CSV
//!
//! # Example
//!
//! ```rust,ignore
//! use kgraph_session::{GraphRegistry, RegistryConfig};
//!
//! let registry = GraphRegistry::new(
//!     RegistryConfig::default()
//!         .with_max_sessions(1000)
//!         .with_ttl(Duration::from_secs(3600)),
//! );
//!
//! let outcome = registry.append("session-1", question, answer, &triples)?;
//! println!("{} triples so far", outcome.stats.total_triples);
//! ```

mod config;
mod error;
mod export;
mod graph;
mod registry;
mod ttl;
pub mod validation;

pub use config::RegistryConfig;
pub use error::{GraphError, Result};
pub use export::{ExportFormat, ExportMetadata, ExportPayload, TripleExport, to_csv};
pub use graph::SessionGraph;
pub use registry::{AppendOutcome, GraphRegistry, RegistryStats};
pub use ttl::TtlTracker;
pub use validation::ValidationError;
