//! Part-of-speech tagger abstraction.
//!
//! Tags follow the ICTCLAS/jieba vocabulary: `nr` person name, `ns` place
//! name, `nt` organization, `nz` other proper noun, `n` generic noun. Every
//! noun subtype starts with `n`.

use serde::{Deserialize, Serialize};

/// Tags whose words are taken as entity candidates in the first pass.
pub const ENTITY_TAGS: &[&str] = &["nr", "ns", "nt", "nz", "n"];

/// A segmented word and its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub word: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Whether `tag` belongs to the named/proper candidate set.
pub fn is_entity_tag(tag: &str) -> bool {
    ENTITY_TAGS.contains(&tag)
}

/// Whether `tag` is in the noun super-category.
pub fn is_noun_tag(tag: &str) -> bool {
    tag.starts_with('n')
}

/// Segments text and assigns part-of-speech tags.
///
/// Implementations must be deterministic for a given input and safe to
/// share across threads.
pub trait Tagger: Send + Sync {
    /// Segment `text` into tagged words, in text order.
    fn tag(&self, text: &str) -> Vec<TaggedWord>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_tags() {
        for tag in ["nr", "ns", "nt", "nz", "n"] {
            assert!(is_entity_tag(tag), "{tag} should be an entity tag");
        }
        assert!(!is_entity_tag("v"));
        assert!(!is_entity_tag("nrt"));
    }

    #[test]
    fn test_noun_prefix() {
        assert!(is_noun_tag("n"));
        assert!(is_noun_tag("nrt"));
        assert!(is_noun_tag("ng"));
        assert!(!is_noun_tag("vn"));
        assert!(!is_noun_tag(""));
    }
}
