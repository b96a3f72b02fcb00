//! Per-session triple accumulator.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use kgraph_types::{GraphStats, QaTurn, SessionSnapshot, Triple, TripleKey};

/// One conversation's knowledge graph.
///
/// Triples and history are append-only and kept in insertion order. The
/// entity set is maintained as the union of the endpoints of retained
/// triples, so no entity exists without a triple.
#[derive(Debug, Clone)]
pub struct SessionGraph {
    session_id: String,
    triples: Vec<Triple>,
    keys: HashSet<TripleKey>,
    entities: Vec<String>,
    entity_index: HashSet<String>,
    history: Vec<QaTurn>,
    created_at: DateTime<Utc>,
}

impl SessionGraph {
    /// Create an empty graph.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            triples: Vec::new(),
            keys: HashSet::new(),
            entities: Vec::new(),
            entity_index: HashSet::new(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Record a question/answer turn and merge its triples.
    ///
    /// Returns the triples that were new to this session, in input order.
    pub fn append(&mut self, question: &str, answer: &str, triples: &[Triple]) -> Vec<Triple> {
        let accepted: Vec<Triple> = triples
            .iter()
            .filter(|t| self.insert_triple((*t).clone()))
            .cloned()
            .collect();
        self.history.push(QaTurn::new(question, answer));
        accepted
    }

    /// Add a triple unless its key is already present.
    pub fn insert_triple(&mut self, triple: Triple) -> bool {
        if !self.keys.insert(triple.key()) {
            return false;
        }
        self.add_entity(&triple.subject);
        self.add_entity(&triple.object);
        self.triples.push(triple);
        true
    }

    fn add_entity(&mut self, entity: &str) {
        if self.entity_index.insert(entity.to_string()) {
            self.entities.push(entity.to_string());
        }
    }

    /// Whether a triple with this key is present.
    pub fn contains(&self, key: &TripleKey) -> bool {
        self.keys.contains(key)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Entities in first-seen order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn history(&self) -> &[QaTurn] {
        &self.history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_entities: self.entities.len(),
            total_triples: self.triples.len(),
            total_history: self.history.len(),
        }
    }

    /// Copy the graph into a serializable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            triples: self.triples.clone(),
            entities: self.entities.clone(),
            history: self.history.clone(),
            stats: self.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_types::RelationLabel;

    fn triple(s: &str, p: RelationLabel, o: &str) -> Triple {
        Triple::new(s, p, o, format!("{s}{o}"))
    }

    #[test]
    fn test_append_records_turn_and_triples() {
        let mut graph = SessionGraph::new("s1");
        let accepted = graph.append(
            "问题",
            "答案",
            &[triple("A", RelationLabel::Contains, "B")],
        );

        assert_eq!(accepted.len(), 1);
        assert_eq!(graph.history().len(), 1);
        assert_eq!(graph.history()[0].question, "问题");
        assert_eq!(graph.entities(), &["A".to_string(), "B".to_string()]);
        assert_eq!(
            graph.stats(),
            GraphStats {
                total_entities: 2,
                total_triples: 1,
                total_history: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_key_rejected_across_calls() {
        let mut graph = SessionGraph::new("s1");
        graph.append("q1", "a1", &[triple("A", RelationLabel::Contains, "B")]);

        let mut again = triple("A", RelationLabel::Contains, "B");
        again.source = "different sentence".to_string();
        let accepted = graph.append("q2", "a2", &[again]);

        assert!(accepted.is_empty());
        assert_eq!(graph.triples().len(), 1);
        assert_eq!(graph.triples()[0].source, "AB");
        assert_eq!(graph.history().len(), 2);
    }

    #[test]
    fn test_duplicate_key_rejected_within_batch() {
        let mut graph = SessionGraph::new("s1");
        let t = triple("A", RelationLabel::Contains, "B");
        let accepted = graph.append("q", "a", &[t.clone(), t]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(graph.triples().len(), 1);
    }

    #[test]
    fn test_same_endpoints_different_predicate_both_kept() {
        let mut graph = SessionGraph::new("s1");
        graph.append(
            "q",
            "a",
            &[
                triple("A", RelationLabel::Contains, "B"),
                triple("A", RelationLabel::Related, "B"),
            ],
        );
        assert_eq!(graph.triples().len(), 2);
        assert_eq!(graph.entities().len(), 2);
    }

    #[test]
    fn test_turn_without_triples_adds_no_entities() {
        let mut graph = SessionGraph::new("s1");
        graph.append("q", "a", &[]);
        assert!(graph.entities().is_empty());
        assert_eq!(graph.stats().total_history, 1);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let mut graph = SessionGraph::new("s1");
        graph.append("q1", "a1", &[triple("C", RelationLabel::Related, "D")]);
        graph.append("q2", "a2", &[triple("A", RelationLabel::Related, "B")]);

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.session_id, "s1");
        assert_eq!(snapshot.triples[0].subject, "C");
        assert_eq!(snapshot.triples[1].subject, "A");
        assert_eq!(snapshot.entities, vec!["C", "D", "A", "B"]);
        assert_eq!(snapshot.history[1].question, "q2");
    }

    #[test]
    fn test_contains_key() {
        let mut graph = SessionGraph::new("s1");
        let t = triple("A", RelationLabel::UsedFor, "B");
        graph.insert_triple(t.clone());
        assert!(graph.contains(&t.key()));
        assert!(!graph.contains(&triple("A", RelationLabel::Related, "B").key()));
    }
}
