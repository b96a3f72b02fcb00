//! Rule-based entity and relation extraction.
//!
//! Turns a free-text answer into a capped list of entities and a
//! deduplicated list of [`Triple`](kgraph_types::Triple)s:
//!
//! ```text
//! text ─▶ normalize ─▶ Tagger ─▶ entity candidates ─┐
//!   └──────────────▶ sentence fragments ────────────┴─▶ pair co-occurrence ─▶ classify ─▶ dedup
//! ```
//!
//! The part-of-speech tagger sits behind the [`Tagger`] trait. Two adapters
//! ship with the crate: [`LexiconTagger`] (dictionary, forward maximum
//! matching) and `JiebaTagger` behind the `jieba` feature.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kgraph_extract::{EntityExtractor, LexiconTagger};
//!
//! let extractor = EntityExtractor::new(Arc::new(LexiconTagger::builtin()));
//! let extraction = extractor.extract("乔布斯创立了苹果公司。苹果公司位于美国。");
//! assert_eq!(extraction.relations.len(), 2);
//! ```

mod error;
mod extractor;
#[cfg(feature = "jieba")]
mod jieba;
mod lexicon;
pub mod patterns;
mod tagger;

pub use error::{ExtractError, Result};
pub use extractor::{
    EntityExtractor, Extraction, ExtractionLimits, normalize_whitespace, split_fragments,
};
#[cfg(feature = "jieba")]
pub use jieba::JiebaTagger;
pub use lexicon::LexiconTagger;
pub use patterns::{RELATION_PATTERNS, classify};
pub use tagger::{ENTITY_TAGS, TaggedWord, Tagger, is_entity_tag, is_noun_tag};
