//! Shared types for the kgraph knowledge-graph builder.
//!
//! These are the values that flow between the extractor, the session
//! registry and the outer surfaces (CLI, service facade):
//!
//! - [`Triple`] and its dedup key [`TripleKey`]
//! - [`RelationLabel`], the closed predicate vocabulary
//! - [`QaTurn`], one question/answer exchange in a session's history
//! - [`GraphStats`] and [`SessionSnapshot`], the read-side views of a session

pub mod relation;
pub mod session;
pub mod triple;

pub use relation::{ParseRelationLabelError, RelationLabel};
pub use session::{GraphStats, QaTurn, SessionSnapshot};
pub use triple::{Triple, TripleKey, truncate_chars};
