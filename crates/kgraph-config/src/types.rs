//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [extraction]   # extraction limits
//! [session]      # registry bounds
//! [tagger]       # tagging backend and user lexicons
//! [logging]      # log file location
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use kgraph_extract::ExtractionLimits;

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. a project-local
/// override) can be loaded and merged section by section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KgraphConfig {
    /// Extraction limits. Missing keys take their defaults.
    pub extraction: Option<ExtractionLimits>,

    /// Session registry configuration.
    pub session: Option<SessionConfig>,

    /// Tagger configuration.
    pub tagger: Option<TaggerConfig>,

    /// Logging configuration.
    pub logging: Option<LoggingConfig>,
}

impl KgraphConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: KgraphConfig) {
        if other.extraction.is_some() {
            self.extraction = other.extraction;
        }
        if other.session.is_some() {
            self.session = other.session;
        }
        if other.tagger.is_some() {
            self.tagger = other.tagger;
        }
        if other.logging.is_some() {
            self.logging = other.logging;
        }
    }

    /// Effective extraction limits.
    pub fn extraction_limits(&self) -> ExtractionLimits {
        self.extraction.unwrap_or_default()
    }

    /// Effective session settings.
    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }

    /// Effective tagger settings.
    pub fn tagger(&self) -> TaggerConfig {
        self.tagger.clone().unwrap_or_default()
    }

    /// Effective logging settings.
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Session registry configuration.
///
/// ```toml
/// [session]
/// max_sessions = 10000
/// ttl_secs = 3600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of live sessions before LRU eviction.
    pub max_sessions: usize,
    /// Idle time-to-live in seconds. Absent or zero disables expiry.
    pub ttl_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            ttl_secs: None,
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tagger Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Which tagger backend to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggerBackend {
    /// jieba when the binary was built with it, otherwise the lexicon.
    #[default]
    Auto,
    /// Built-in lexicon with forward maximum matching.
    Lexicon,
    /// jieba segmentation (requires the `jieba` feature).
    Jieba,
}

impl TaggerBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Lexicon => "lexicon",
            Self::Jieba => "jieba",
        }
    }
}

impl fmt::Display for TaggerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaggerBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "lexicon" => Ok(Self::Lexicon),
            "jieba" => Ok(Self::Jieba),
            other => Err(format!("unknown tagger backend: {other}")),
        }
    }
}

/// Tagger configuration.
///
/// ```toml
/// [tagger]
/// backend = "auto"   # or "lexicon" / "jieba"
/// lexicon = ["~/dicts/tech.txt"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    pub backend: TaggerBackend,
    /// User dictionaries in `word [freq] [tag]` format, loaded in order.
    pub lexicon: Vec<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration.
///
/// ```toml
/// [logging]
/// dir = "/var/log/kgraph"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log. Defaults to `<config dir>/logs`.
    pub dir: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
