//! Dictionary tagger using forward maximum matching.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use crate::tagger::{TaggedWord, Tagger};

/// Lexicon compiled into the binary.
const BUILTIN_LEXICON: &str = include_str!("../data/lexicon.txt");

/// Tag for entries that name no tag.
const DEFAULT_TAG: &str = "n";

/// Tag for unknown characters and whitespace.
const UNKNOWN_TAG: &str = "x";

/// Tagger backed by an in-memory lexicon.
///
/// At each position the longest lexicon word starting there wins. Text not
/// covered by the lexicon falls back to:
/// - runs of ASCII digits → `m`
/// - runs of ASCII letters/digits → `eng`
/// - runs of whitespace → `x`
/// - any other character, one at a time → `x`
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, String>,
    /// Length in chars of the longest entry.
    max_word_chars: usize,
}

impl LexiconTagger {
    /// Create an empty tagger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tagger preloaded with the built-in lexicon.
    pub fn builtin() -> Self {
        let mut tagger = Self::new();
        if let Err(e) = tagger.extend_from_str(BUILTIN_LEXICON) {
            warn!(error = %e, "built-in lexicon is malformed");
        }
        tagger
    }

    /// Add or replace a single entry.
    pub fn insert(&mut self, word: impl Into<String>, tag: impl Into<String>) {
        let word = word.into();
        if word.is_empty() {
            return;
        }
        self.max_word_chars = self.max_word_chars.max(word.chars().count());
        self.entries.insert(word, tag.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_entry(mut self, word: impl Into<String>, tag: impl Into<String>) -> Self {
        self.insert(word, tag);
        self
    }

    /// Parse lexicon lines (`word [freq] tag`) and merge them in.
    ///
    /// Blank lines and `#` comments are skipped. Returns the number of
    /// entries added.
    pub fn extend_from_str(&mut self, contents: &str) -> Result<usize> {
        let mut added = 0;
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let (word, tag) = match fields.as_slice() {
                [word] => (*word, DEFAULT_TAG),
                [word, second] => {
                    // `word freq` or `word tag`
                    if second.parse::<u64>().is_ok() {
                        (*word, DEFAULT_TAG)
                    } else {
                        (*word, *second)
                    }
                }
                [word, freq, tag] => {
                    freq.parse::<u64>().map_err(|_| ExtractError::InvalidEntry {
                        line: idx + 1,
                        reason: format!("frequency '{freq}' is not a number"),
                    })?;
                    (*word, *tag)
                }
                _ => {
                    return Err(ExtractError::InvalidEntry {
                        line: idx + 1,
                        reason: format!("expected 1-3 fields, found {}", fields.len()),
                    });
                }
            };

            self.insert(word, tag);
            added += 1;
        }
        Ok(added)
    }

    /// Load a lexicon file and merge it in.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path).map_err(|e| ExtractError::ReadLexicon {
            path: path.display().to_string(),
            source: e,
        })?;
        let added = self.extend_from_str(&contents)?;
        debug!(path = %path.display(), added, "Loaded lexicon file");
        Ok(added)
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest lexicon match starting at char position `start`, as an end
    /// char position and tag.
    fn longest_match(&self, text: &str, offsets: &[usize], start: usize) -> Option<(usize, &str)> {
        let available = offsets.len() - 1 - start;
        let longest = self.max_word_chars.min(available);
        (1..=longest).rev().find_map(|len| {
            let end = start + len;
            self.entries
                .get(&text[offsets[start]..offsets[end]])
                .map(|tag| (end, tag.as_str()))
        })
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<TaggedWord> {
        // Byte offset of every char, plus the end of the string.
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let chars: Vec<char> = text.chars().collect();

        let mut words = Vec::new();
        let mut pos = 0;
        while pos < chars.len() {
            if let Some((end, tag)) = self.longest_match(text, &offsets, pos) {
                words.push(TaggedWord::new(&text[offsets[pos]..offsets[end]], tag));
                pos = end;
                continue;
            }

            let c = chars[pos];
            let run_end = |pred: fn(&char) -> bool| {
                chars[pos..]
                    .iter()
                    .position(|ch| !pred(ch))
                    .map_or(chars.len(), |n| pos + n)
            };

            let (end, tag) = if c.is_whitespace() {
                (run_end(|ch: &char| ch.is_whitespace()), UNKNOWN_TAG)
            } else if c.is_ascii_alphanumeric() {
                let end = run_end(|ch: &char| ch.is_ascii_alphanumeric());
                let all_digits = chars[pos..end].iter().all(|ch| ch.is_ascii_digit());
                (end, if all_digits { "m" } else { "eng" })
            } else {
                (pos + 1, UNKNOWN_TAG)
            };

            words.push(TaggedWord::new(&text[offsets[pos]..offsets[end]], tag));
            pos = end;
        }

        words
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn words(tagged: &[TaggedWord]) -> Vec<(&str, &str)> {
        tagged
            .iter()
            .map(|t| (t.word.as_str(), t.tag.as_str()))
            .collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let tagger = LexiconTagger::new()
            .with_entry("苹果", "n")
            .with_entry("苹果公司", "nt")
            .with_entry("位于", "v");

        let tagged = tagger.tag("苹果公司位于");
        assert_eq!(words(&tagged), vec![("苹果公司", "nt"), ("位于", "v")]);
    }

    #[test]
    fn test_unknown_characters() {
        let tagger = LexiconTagger::new().with_entry("北京", "ns");

        let tagged = tagger.tag("北京 2024 hello，好");
        assert_eq!(
            words(&tagged),
            vec![
                ("北京", "ns"),
                (" ", "x"),
                ("2024", "m"),
                (" ", "x"),
                ("hello", "eng"),
                ("，", "x"),
                ("好", "x"),
            ]
        );
    }

    #[test]
    fn test_ascii_lexicon_word() {
        let tagger = LexiconTagger::new().with_entry("Python", "nz");
        let tagged = tagger.tag("Python编程");
        assert_eq!(tagged[0], TaggedWord::new("Python", "nz"));
    }

    #[test]
    fn test_empty_text() {
        assert!(LexiconTagger::builtin().tag("").is_empty());
    }

    #[test]
    fn test_extend_from_str_formats() {
        let mut tagger = LexiconTagger::new();
        let added = tagger
            .extend_from_str("# comment\n\n长城 ns\n故宫 80 ns\n首都\n太阳 10\n")
            .unwrap();
        assert_eq!(added, 4);

        let tagged = tagger.tag("长城故宫首都太阳");
        assert_eq!(
            words(&tagged),
            vec![("长城", "ns"), ("故宫", "ns"), ("首都", "n"), ("太阳", "n")]
        );
    }

    #[test]
    fn test_extend_from_str_rejects_bad_frequency() {
        let mut tagger = LexiconTagger::new();
        let err = tagger.extend_from_str("长城 ns\n故宫 lots ns\n").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidEntry { line: 2, .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "量子计算 50 n").unwrap();

        let mut tagger = LexiconTagger::new();
        assert_eq!(tagger.load_file(file.path()).unwrap(), 1);
        assert_eq!(tagger.tag("量子计算")[0].tag, "n");
    }

    #[test]
    fn test_load_missing_file() {
        let mut tagger = LexiconTagger::new();
        let err = tagger
            .load_file(Path::new("/nonexistent/lexicon.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::ReadLexicon { .. }));
    }

    #[test]
    fn test_builtin_is_loaded() {
        let tagger = LexiconTagger::builtin();
        assert!(!tagger.is_empty());
        let tagged = tagger.tag("乔布斯创立了苹果公司");
        assert_eq!(
            words(&tagged),
            vec![
                ("乔布斯", "nr"),
                ("创立", "v"),
                ("了", "u"),
                ("苹果公司", "nt"),
            ]
        );
    }
}
