//! Subject-predicate-object facts with provenance.

use serde::{Deserialize, Serialize};

use crate::RelationLabel;

/// A (subject, predicate, object) fact and the sentence it was mined from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// Subject entity.
    pub subject: String,
    /// Relation category.
    pub predicate: RelationLabel,
    /// Object entity.
    pub object: String,
    /// Sentence fragment the relation was found in.
    #[serde(default)]
    pub source: String,
}

impl Triple {
    /// Create a new triple.
    pub fn new(
        subject: impl Into<String>,
        predicate: RelationLabel,
        object: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
            source: source.into(),
        }
    }

    /// The identity of this triple for deduplication.
    pub fn key(&self) -> TripleKey {
        TripleKey {
            subject: self.subject.clone(),
            predicate: self.predicate,
            object: self.object.clone(),
        }
    }
}

/// Dedup key: two triples with equal keys are the same fact, whatever their
/// source sentences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripleKey {
    pub subject: String,
    pub predicate: RelationLabel,
    pub object: String,
}

/// Truncate `s` to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_source() {
        let a = Triple::new("北京", RelationLabel::BelongsTo, "首都", "北京是首都");
        let b = Triple::new("北京", RelationLabel::BelongsTo, "首都", "另一句话");
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_predicate() {
        let a = Triple::new("A", RelationLabel::Contains, "B", "");
        let b = Triple::new("A", RelationLabel::Related, "B", "");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_serialized_field_names() {
        let triple = Triple::new("A", RelationLabel::Contains, "B", "A有B");
        let value = serde_json::to_value(&triple).unwrap();
        assert_eq!(value["subject"], "A");
        assert_eq!(value["predicate"], "contains");
        assert_eq!(value["object"], "B");
        assert_eq!(value["source"], "A有B");
    }

    #[test]
    fn test_truncate_chars_counts_scalars() {
        assert_eq!(truncate_chars("人工智能", 2), "人工");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
