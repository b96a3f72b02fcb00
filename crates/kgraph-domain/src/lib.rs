//! Domain facade for kgraph.
//!
//! Sits between the CLI and the infrastructure crates:
//!
//! - **Knowledge service**: runs extraction on an answer and merges the
//!   result into the session's graph
//! - **Construction**: builds the tagger, extractor and registry from
//!   [`KgraphConfig`]
//!
//! # Example
//!
//! ```ignore
//! use kgraph_domain::DomainServices;
//!
//! let services = DomainServices::from_config(&config)?;
//! let outcome = services.knowledge().process(None, question, answer)?;
//! println!("{} new triples", outcome.new_triples.len());
//! ```

mod error;
pub mod services;

pub use error::{DomainError, Result};
pub use services::DomainServices;
pub use services::knowledge::{KnowledgeService, ProcessOutcome};

pub use kgraph_config::KgraphConfig;
pub use kgraph_extract::{EntityExtractor, Extraction, ExtractionLimits};
pub use kgraph_session::{ExportFormat, ExportPayload, GraphRegistry, RegistryConfig};
pub use kgraph_types::{GraphStats, SessionSnapshot, Triple};
