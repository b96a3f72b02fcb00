//! Session-level read models: history turns, counters and snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Triple;

/// One question/answer exchange recorded in a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaTurn {
    pub question: String,
    pub answer: String,
    /// When the turn was appended.
    pub timestamp: DateTime<Utc>,
}

impl QaTurn {
    /// Create a turn stamped with the current time.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Aggregate counters for one session graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_entities: usize,
    pub total_triples: usize,
    pub total_history: usize,
}

/// Point-in-time copy of a session graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    /// Triples in discovery order.
    pub triples: Vec<Triple>,
    /// Entities in first-seen order.
    pub entities: Vec<String>,
    /// Question/answer turns in append order.
    pub history: Vec<QaTurn>,
    pub stats: GraphStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_shape() {
        let snapshot = SessionSnapshot {
            session_id: "s1".to_string(),
            triples: vec![],
            entities: vec!["A".to_string()],
            history: vec![QaTurn::new("q", "a")],
            stats: GraphStats {
                total_entities: 1,
                total_triples: 0,
                total_history: 1,
            },
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["session_id"], "s1");
        assert_eq!(value["stats"]["total_entities"], 1);
        assert_eq!(value["stats"]["total_history"], 1);
        assert_eq!(value["history"][0]["question"], "q");
        assert!(value["history"][0]["timestamp"].is_string());
    }
}
