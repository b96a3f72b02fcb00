//! Entity and relation extraction from free text.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use kgraph_types::{Triple, TripleKey, truncate_chars};

use crate::patterns::classify;
use crate::tagger::{TaggedWord, Tagger, is_entity_tag, is_noun_tag};

/// Clause and sentence delimiters used to cut text into fragments.
const FRAGMENT_DELIMITERS: &[char] = &['。', '！', '？', '；', '，'];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Size limits applied during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionLimits {
    /// Entity candidates considered for relation mining.
    pub max_candidates: usize,
    /// Entities reported in the result.
    pub max_entities: usize,
    /// Triples reported in the result.
    pub max_relations: usize,
    /// Below this many first-pass candidates, generic nouns are mined too.
    pub fallback_threshold: usize,
    /// Generic nouns taken by the fallback pass.
    pub max_fallback_nouns: usize,
    /// Minimum entity length in chars.
    pub min_entity_chars: usize,
    /// Maximum length in chars of a triple's source sentence.
    pub max_source_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_candidates: 20,
            max_entities: 15,
            max_relations: 10,
            fallback_threshold: 3,
            max_fallback_nouns: 8,
            min_entity_chars: 2,
            max_source_chars: 100,
        }
    }
}

/// Entities and triples extracted from one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub entities: Vec<String>,
    pub relations: Vec<Triple>,
}

impl Extraction {
    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}

/// Rule-based entity/relation extractor.
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Clone)]
pub struct EntityExtractor {
    tagger: Arc<dyn Tagger>,
    limits: ExtractionLimits,
}

impl EntityExtractor {
    /// Create an extractor with default limits.
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self {
            tagger,
            limits: ExtractionLimits::default(),
        }
    }

    /// Override the extraction limits.
    pub fn with_limits(mut self, limits: ExtractionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The active limits.
    pub fn limits(&self) -> &ExtractionLimits {
        &self.limits
    }

    pub fn tagger_name(&self) -> &'static str {
        self.tagger.name()
    }

    /// Extract entities and relation triples from `text`.
    pub fn extract(&self, text: &str) -> Extraction {
        let text = normalize_whitespace(text);
        let tagged = self.tagger.tag(&text);

        let mut candidates = self.candidate_entities(&tagged);
        candidates.truncate(self.limits.max_candidates);

        let fragments = split_fragments(&text);
        let mut relations = self.mine_relations(&candidates, &fragments);
        relations.truncate(self.limits.max_relations);

        candidates.truncate(self.limits.max_entities);

        debug!(
            tagger = self.tagger.name(),
            words = tagged.len(),
            fragments = fragments.len(),
            entities = candidates.len(),
            relations = relations.len(),
            "Extracted entities and relations"
        );

        Extraction {
            entities: candidates,
            relations,
        }
    }

    /// Collect entity candidates in first-seen order, without duplicates.
    fn candidate_entities(&self, tagged: &[TaggedWord]) -> Vec<String> {
        let long_enough = |word: &str| word.chars().count() >= self.limits.min_entity_chars;

        let mut candidates = CandidateSet::default();
        for t in tagged {
            if is_entity_tag(&t.tag) && long_enough(&t.word) {
                candidates.insert(&t.word);
            }
        }

        if candidates.len() < self.limits.fallback_threshold {
            let nouns: Vec<&str> = tagged
                .iter()
                .filter(|t| is_noun_tag(&t.tag) && long_enough(&t.word))
                .map(|t| t.word.as_str())
                .take(self.limits.max_fallback_nouns)
                .collect();
            trace!(nouns = ?nouns, "Few named entities, merging generic nouns");
            for noun in nouns {
                candidates.insert(noun);
            }
        }

        candidates.into_vec()
    }

    /// Find one triple per co-occurring entity pair, deduplicated by key.
    fn mine_relations(&self, entities: &[String], fragments: &[&str]) -> Vec<Triple> {
        let mut seen: HashSet<TripleKey> = HashSet::new();
        let mut relations = Vec::new();

        for (i, subject) in entities.iter().enumerate() {
            for object in &entities[i + 1..] {
                let Some(fragment) = fragments
                    .iter()
                    .find(|f| f.contains(subject.as_str()) && f.contains(object.as_str()))
                else {
                    continue;
                };

                let source = truncate_chars(fragment.trim(), self.limits.max_source_chars);
                let triple = Triple::new(subject, classify(fragment), object, source);
                if seen.insert(triple.key()) {
                    relations.push(triple);
                }
            }
        }

        relations
    }
}

/// Insertion-ordered set of entity strings.
#[derive(Default)]
struct CandidateSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl CandidateSet {
    fn insert(&mut self, word: &str) {
        if self.seen.insert(word.to_string()) {
            self.order.push(word.to_string());
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl std::fmt::Debug for EntityExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityExtractor")
            .field("tagger", &self.tagger.name())
            .field("limits", &self.limits)
            .finish()
    }
}

/// Collapse every run of whitespace to a single space.
pub fn normalize_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE.replace_all(text, " ")
}

/// Split text into clause fragments on `。！？；，`.
///
/// Empty fragments are kept so positions line up with the delimiters.
pub fn split_fragments(text: &str) -> Vec<&str> {
    text.split(FRAGMENT_DELIMITERS).collect()
}
