//! Domain services.

pub mod knowledge;

use std::sync::Arc;

use tracing::{info, warn};

use kgraph_config::{KgraphConfig, TaggerBackend, TaggerConfig};
use kgraph_extract::{EntityExtractor, LexiconTagger, Tagger};
use kgraph_session::{GraphRegistry, RegistryConfig};

use crate::error::Result;

/// Domain services facade.
///
/// Main entry point for the CLI; owns the shared extractor and registry.
#[derive(Debug, Clone)]
pub struct DomainServices {
    knowledge: knowledge::KnowledgeService,
}

impl DomainServices {
    /// Assemble services from already-built components.
    pub fn new(extractor: Arc<EntityExtractor>, registry: Arc<GraphRegistry>) -> Self {
        Self {
            knowledge: knowledge::KnowledgeService::new(extractor, registry),
        }
    }

    /// Build the tagger, extractor and registry described by `config`.
    pub fn from_config(config: &KgraphConfig) -> Result<Self> {
        let tagger = build_tagger(&config.tagger())?;
        let extractor = EntityExtractor::new(tagger).with_limits(config.extraction_limits());

        let session = config.session();
        let mut registry_config = RegistryConfig::new().with_max_sessions(session.max_sessions);
        if let Some(ttl) = session.ttl() {
            registry_config = registry_config.with_ttl(ttl);
        }

        info!(
            tagger = extractor.tagger_name(),
            max_sessions = registry_config.max_sessions,
            ttl_secs = registry_config.ttl.map(|t| t.as_secs()),
            "Initializing domain services"
        );

        Ok(Self::new(
            Arc::new(extractor),
            Arc::new(GraphRegistry::new(registry_config)),
        ))
    }

    pub fn knowledge(&self) -> &knowledge::KnowledgeService {
        &self.knowledge
    }
}

/// Build the configured tagger, loading user lexicons in order.
///
/// `auto` resolves to jieba when this crate was built with the `jieba`
/// feature and to the built-in lexicon otherwise.
pub fn build_tagger(config: &TaggerConfig) -> Result<Arc<dyn Tagger>> {
    match config.backend {
        TaggerBackend::Lexicon => build_lexicon(config),
        TaggerBackend::Jieba => build_jieba(config),
        TaggerBackend::Auto if cfg!(feature = "jieba") => build_jieba(config),
        TaggerBackend::Auto => build_lexicon(config),
    }
}

fn build_lexicon(config: &TaggerConfig) -> Result<Arc<dyn Tagger>> {
    let mut tagger = LexiconTagger::builtin();
    for path in &config.lexicon {
        let added = tagger.load_file(path)?;
        info!(path = %path.display(), entries = added, "Loaded user lexicon");
    }
    if tagger.is_empty() {
        warn!("Lexicon tagger has no entries; extraction will find nothing");
    }
    Ok(Arc::new(tagger))
}

#[cfg(feature = "jieba")]
fn build_jieba(config: &TaggerConfig) -> Result<Arc<dyn Tagger>> {
    let mut tagger = kgraph_extract::JiebaTagger::new();
    for path in &config.lexicon {
        tagger.load_user_dict(path)?;
        info!(path = %path.display(), "Loaded jieba user dictionary");
    }
    Ok(Arc::new(tagger))
}

#[cfg(not(feature = "jieba"))]
fn build_jieba(_config: &TaggerConfig) -> Result<Arc<dyn Tagger>> {
    Err(crate::DomainError::Config(
        "tagger backend 'jieba' requires building with the `jieba` feature".to_string(),
    ))
}
