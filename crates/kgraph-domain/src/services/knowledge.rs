//! Knowledge service: turns question/answer turns into session graphs.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use kgraph_extract::{EntityExtractor, Extraction};
use kgraph_session::validation::{validate_answer, validate_question, validate_session_id};
use kgraph_session::{ExportFormat, ExportPayload, GraphRegistry};
use kgraph_types::{GraphStats, SessionSnapshot, Triple};

use crate::error::Result;

/// Result of processing one turn.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub session_id: String,
    pub question: String,
    pub answer: String,
    /// Everything the extractor found in the answer.
    pub extraction: Extraction,
    /// The subset of extracted triples that were new to the session.
    pub new_triples: Vec<Triple>,
    pub stats: GraphStats,
}

/// Domain service for extraction and session graph operations.
///
/// The extractor is shared immutably; the registry is shared with any other
/// holder of the same `Arc`.
#[derive(Debug, Clone)]
pub struct KnowledgeService {
    extractor: Arc<EntityExtractor>,
    registry: Arc<GraphRegistry>,
}

impl KnowledgeService {
    pub fn new(extractor: Arc<EntityExtractor>, registry: Arc<GraphRegistry>) -> Self {
        Self {
            extractor,
            registry,
        }
    }

    pub fn extractor(&self) -> &Arc<EntityExtractor> {
        &self.extractor
    }

    pub fn registry(&self) -> &Arc<GraphRegistry> {
        &self.registry
    }

    /// Mint a fresh session ID. No state is created until the first turn.
    pub fn new_session(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Extract from `answer` and merge the result into the session.
    ///
    /// `None` starts a new session under a fresh ID. Inputs are validated
    /// before anything is touched.
    pub fn process(
        &self,
        session_id: Option<&str>,
        question: &str,
        answer: &str,
    ) -> Result<ProcessOutcome> {
        validate_question(question)?;
        validate_answer(answer)?;
        let session_id = match session_id {
            Some(id) => {
                validate_session_id(id)?;
                id.to_string()
            }
            None => self.new_session(),
        };

        let extraction = self.extractor.extract(answer);
        debug!(
            session_id = %session_id,
            entities = extraction.entities.len(),
            relations = extraction.relations.len(),
            "Answer extracted"
        );

        let outcome = self
            .registry
            .append(&session_id, question, answer, &extraction.relations)?;

        info!(
            session_id = %session_id,
            new_triples = outcome.accepted.len(),
            total_triples = outcome.stats.total_triples,
            "Turn processed"
        );

        Ok(ProcessOutcome {
            session_id,
            question: question.to_string(),
            answer: answer.to_string(),
            extraction,
            new_triples: outcome.accepted,
            stats: outcome.stats,
        })
    }

    /// Snapshot a session's graph.
    pub fn graph(&self, session_id: &str) -> Result<SessionSnapshot> {
        Ok(self.registry.get(session_id)?)
    }

    /// Drop a session. Returns whether anything was removed.
    pub fn clear(&self, session_id: &str) -> Result<bool> {
        Ok(self.registry.clear(session_id)?)
    }

    /// Export a session in the given format.
    pub fn export(&self, session_id: &str, format: ExportFormat) -> Result<ExportPayload> {
        Ok(self.registry.export(session_id, format)?)
    }

    /// Export a session, parsing the format name first.
    ///
    /// An unknown format is reported before the session is looked up.
    pub fn export_named(&self, session_id: &str, format: &str) -> Result<ExportPayload> {
        let format: ExportFormat = format.parse()?;
        self.export(session_id, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_extract::LexiconTagger;
    use kgraph_session::{RegistryConfig, ValidationError};
    use kgraph_types::RelationLabel;

    use crate::DomainError;

    const QUESTION: &str = "苹果公司是谁创立的？";
    const ANSWER: &str = "乔布斯创立了苹果公司。苹果公司位于美国。";

    fn service() -> KnowledgeService {
        let extractor = EntityExtractor::new(Arc::new(LexiconTagger::builtin()));
        KnowledgeService::new(
            Arc::new(extractor),
            Arc::new(GraphRegistry::new(RegistryConfig::default())),
        )
    }

    #[test]
    fn test_process_new_session() {
        let service = service();
        let outcome = service.process(None, QUESTION, ANSWER).unwrap();

        assert!(Uuid::parse_str(&outcome.session_id).is_ok());
        assert_eq!(outcome.question, QUESTION);
        assert_eq!(outcome.answer, ANSWER);

        let keys: Vec<_> = outcome
            .new_triples
            .iter()
            .map(|t| (t.subject.as_str(), t.predicate, t.object.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("乔布斯", RelationLabel::CreatedBy, "苹果公司"),
                ("苹果公司", RelationLabel::LocatedIn, "美国"),
            ]
        );
        assert_eq!(outcome.stats.total_triples, 2);
        assert_eq!(outcome.stats.total_entities, 3);
        assert_eq!(outcome.stats.total_history, 1);
    }

    #[test]
    fn test_process_outcome_json_shape() {
        let service = service();
        let outcome = service.process(Some("s1"), QUESTION, ANSWER).unwrap();
        let source = outcome.new_triples[0].source.clone();
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["session_id"], "s1");
        assert_eq!(value["question"], QUESTION);
        assert_eq!(value["answer"], ANSWER);
        assert_eq!(
            value["extraction"]["entities"],
            serde_json::json!(["乔布斯", "苹果公司", "美国"])
        );
        assert_eq!(
            value["new_triples"][0],
            serde_json::json!({
                "subject": "乔布斯",
                "predicate": "created-by",
                "object": "苹果公司",
                "source": source,
            })
        );
        assert_eq!(value["new_triples"][1]["predicate"], "located-in");
        assert_eq!(
            value["stats"],
            serde_json::json!({"total_entities": 3, "total_triples": 2, "total_history": 1})
        );
    }

    #[test]
    fn test_reprocess_same_answer_dedups() {
        let service = service();
        let first = service.process(Some("s1"), QUESTION, ANSWER).unwrap();
        let second = service.process(Some("s1"), QUESTION, ANSWER).unwrap();

        assert_eq!(first.new_triples.len(), 2);
        assert!(second.new_triples.is_empty());
        assert_eq!(second.extraction.relations.len(), 2);
        assert_eq!(second.stats.total_triples, 2);
        assert_eq!(second.stats.total_history, 2);
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let service = service();

        let err = service.process(Some("s1"), "  ", ANSWER).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidInput(ValidationError::EmptyQuestion)
        ));

        let err = service.process(Some("s1"), QUESTION, "\n\t").unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidInput(ValidationError::EmptyAnswer)
        ));

        let err = service.process(Some(""), QUESTION, ANSWER).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidInput(ValidationError::EmptySessionId)
        ));

        assert!(service.registry().is_empty());
    }

    #[test]
    fn test_answer_without_relations_still_records_history() {
        let service = service();
        let outcome = service.process(Some("s1"), "你好", "你好！").unwrap();
        assert!(outcome.new_triples.is_empty());

        let graph = service.graph("s1").unwrap();
        assert_eq!(graph.history.len(), 1);
        assert!(graph.triples.is_empty());
    }

    #[test]
    fn test_graph_and_clear() {
        let service = service();
        service.process(Some("s1"), QUESTION, ANSWER).unwrap();

        assert_eq!(service.graph("s1").unwrap().triples.len(), 2);
        assert!(service.clear("s1").unwrap());
        assert!(!service.clear("s1").unwrap());
        assert!(matches!(
            service.graph("s1"),
            Err(DomainError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_blank_session_id_is_invalid_not_missing() {
        let service = service();
        service.process(Some("s1"), QUESTION, ANSWER).unwrap();

        assert!(matches!(
            service.graph(""),
            Err(DomainError::InvalidInput(ValidationError::EmptySessionId))
        ));
        assert!(matches!(
            service.export_named("  ", "json"),
            Err(DomainError::InvalidInput(ValidationError::EmptySessionId))
        ));
        assert!(matches!(
            service.clear(""),
            Err(DomainError::InvalidInput(ValidationError::EmptySessionId))
        ));

        // Unknown but well-formed ids stay in the not-found class.
        assert!(matches!(
            service.graph("missing"),
            Err(DomainError::SessionNotFound(_))
        ));
        assert!(!service.clear("missing").unwrap());
        assert_eq!(service.graph("s1").unwrap().triples.len(), 2);
    }

    #[test]
    fn test_export_errors_are_distinct() {
        let service = service();
        service.process(Some("s1"), QUESTION, ANSWER).unwrap();

        assert!(matches!(
            service.export_named("s1", "xml"),
            Err(DomainError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            service.export_named("missing", "csv"),
            Err(DomainError::SessionNotFound(_))
        ));

        let csv = service.export_named("s1", "CSV").unwrap().render().unwrap();
        assert!(csv.starts_with("subject,predicate,object,source\n乔布斯,created-by,苹果公司,"));
    }

    #[test]
    fn test_new_session_ids_are_unique() {
        let service = service();
        assert_ne!(service.new_session(), service.new_session());
        assert!(service.registry().is_empty());
    }
}
