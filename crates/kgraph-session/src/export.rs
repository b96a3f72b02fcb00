//! JSON and CSV renderings of a session graph.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kgraph_types::Triple;

use crate::error::{GraphError, Result};
use crate::graph::SessionGraph;

const CSV_HEADER: &str = "subject,predicate,object,source";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(GraphError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Export counters stamped at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub export_time: DateTime<Utc>,
    pub total_triples: usize,
    pub total_entities: usize,
}

/// The JSON export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleExport {
    pub triples: Vec<Triple>,
    pub metadata: ExportMetadata,
}

impl TripleExport {
    pub(crate) fn from_graph(graph: &SessionGraph) -> Self {
        Self {
            triples: graph.triples().to_vec(),
            metadata: ExportMetadata {
                export_time: Utc::now(),
                total_triples: graph.triples().len(),
                total_entities: graph.entities().len(),
            },
        }
    }
}

/// A rendered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    Json(TripleExport),
    Csv(String),
}

impl ExportPayload {
    pub(crate) fn build(graph: &SessionGraph, format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json(TripleExport::from_graph(graph)),
            ExportFormat::Csv => Self::Csv(to_csv(graph.triples())),
        }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            Self::Json(_) => ExportFormat::Json,
            Self::Csv(_) => ExportFormat::Csv,
        }
    }

    /// Render to the text that would be written to a file.
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Json(doc) => Ok(serde_json::to_string_pretty(doc)?),
            Self::Csv(text) => Ok(text.clone()),
        }
    }
}

/// Render triples as CSV.
///
/// The source column is always wrapped in double quotes and nothing is
/// escaped; lines are joined with `\n` and there is no trailing newline.
pub fn to_csv(triples: &[Triple]) -> String {
    let mut lines = Vec::with_capacity(triples.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(triples.iter().map(|t| {
        format!(
            "{},{},{},\"{}\"",
            t.subject,
            t.predicate.as_str(),
            t.object,
            t.source
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_types::RelationLabel;

    #[test]
    fn test_csv_single_triple_is_exact() {
        let triples = vec![Triple::new("A", RelationLabel::Contains, "B", "A有B")];
        assert_eq!(
            to_csv(&triples),
            "subject,predicate,object,source\nA,contains,B,\"A有B\""
        );
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        assert_eq!(to_csv(&[]), "subject,predicate,object,source");
    }

    #[test]
    fn test_csv_does_not_escape_quotes() {
        let triples = vec![Triple::new("A", RelationLabel::Related, "B", "say \"hi\"")];
        assert!(to_csv(&triples).ends_with("A,related,B,\"say \"hi\"\""));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(GraphError::UnsupportedFormat(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_json_document_shape() {
        let mut graph = SessionGraph::new("s1");
        graph.append(
            "q",
            "a",
            &[Triple::new("A", RelationLabel::Contains, "B", "A有B")],
        );

        let payload = ExportPayload::build(&graph, ExportFormat::Json);
        assert_eq!(payload.format(), ExportFormat::Json);

        let value: serde_json::Value = serde_json::from_str(&payload.render().unwrap()).unwrap();
        assert_eq!(value["triples"][0]["subject"], "A");
        assert_eq!(value["triples"][0]["predicate"], "contains");
        assert_eq!(value["triples"][0]["source"], "A有B");
        assert_eq!(value["metadata"]["total_triples"], 1);
        assert_eq!(value["metadata"]["total_entities"], 2);
        assert!(value["metadata"]["export_time"].is_string());
    }
}
