//! The closed set of relation labels the extractor can assign.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Predicate category of a [`Triple`](crate::Triple).
///
/// Variant order matches the priority order of the extractor's keyword
/// table; `ALL` preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationLabel {
    /// Subject is a kind of, or is named as, the object.
    BelongsTo,
    /// Subject has or includes the object.
    Contains,
    /// Subject is situated in the object.
    LocatedIn,
    /// Subject created, founded or proposed the object.
    CreatedBy,
    /// Subject is applied to the object.
    UsedFor,
    /// Catch-all association.
    Related,
}

impl RelationLabel {
    /// Every label, in classification priority order.
    pub const ALL: [RelationLabel; 6] = [
        Self::BelongsTo,
        Self::Contains,
        Self::LocatedIn,
        Self::CreatedBy,
        Self::UsedFor,
        Self::Related,
    ];

    /// Wire name used in snapshots and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelongsTo => "belongs-to",
            Self::Contains => "contains",
            Self::LocatedIn => "located-in",
            Self::CreatedBy => "created-by",
            Self::UsedFor => "used-for",
            Self::Related => "related",
        }
    }

    /// Chinese display name of the category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BelongsTo => "属于",
            Self::Contains => "包含",
            Self::LocatedIn => "位于",
            Self::CreatedBy => "创造",
            Self::UsedFor => "用于",
            Self::Related => "相关",
        }
    }
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known relation label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation label: {0}")]
pub struct ParseRelationLabelError(pub String);

impl FromStr for RelationLabel {
    type Err = ParseRelationLabelError;

    /// Accepts either the wire name or the Chinese display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s || label.display_name() == s)
            .ok_or_else(|| ParseRelationLabelError(s.to_string()))
    }
}
