//! Tagger backed by jieba-rs.
//!
//! This module is only compiled when the `jieba` feature is enabled.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::tagger::{TaggedWord, Tagger};

/// jieba segmentation with HMM for unknown words.
pub struct JiebaTagger {
    jieba: Jieba,
}

impl JiebaTagger {
    /// Create a tagger with jieba's bundled dictionary.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }

    /// Merge a user dictionary (`word [freq] [tag]` per line).
    pub fn load_user_dict(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| ExtractError::ReadLexicon {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);
        self.jieba
            .load_dict(&mut reader)
            .map_err(|e| ExtractError::Backend(e.to_string()))?;
        debug!(path = %path.display(), "Loaded jieba user dictionary");
        Ok(())
    }
}

impl Default for JiebaTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for JiebaTagger {
    fn tag(&self, text: &str) -> Vec<TaggedWord> {
        self.jieba
            .tag(text, true)
            .into_iter()
            .map(|t| TaggedWord::new(t.word, t.tag))
            .collect()
    }

    fn name(&self) -> &'static str {
        "jieba"
    }
}
