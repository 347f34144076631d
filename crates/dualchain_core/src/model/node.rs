//! Node domain model.
//!
//! # Responsibility
//! - Define the canonical timestamped entry appended to either chain.
//! - Name the two chains (`Lane`) for store and persistence code.
//!
//! # Invariants
//! - `id` is never reused for another node in either chain.
//! - `pair_id`, when set, was assigned at creation time against a node in
//!   the opposite lane. It may dangle after that lane is destroyed;
//!   consumers resolve it by lookup and treat a miss as "no pairing".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every chain node.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NodeId = Uuid;

/// Which of the two chains a node lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Primary chain.
    Main,
    /// Secondary chain. Every add lands here first.
    Sub,
}

impl Lane {
    /// Returns the lane holding this lane's pairing partners.
    pub fn opposite(self) -> Self {
        match self {
            Self::Main => Self::Sub,
            Self::Sub => Self::Main,
        }
    }

    /// Stable lowercase name used in logs and storage keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sub => "sub",
        }
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped entry.
///
/// Field names mirror the persisted wire shape; `pair_id` is serialized as
/// `pairId` and omitted entirely (not null) when unset, so field absence
/// round-trips as absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable opaque ID used for pairing lookups.
    pub id: NodeId,
    /// User-entered text. Non-empty after trim; enforced by input
    /// validation before the store is touched.
    pub content: String,
    /// Point in time of the entry, serialized as ISO-8601.
    pub dt: DateTime<Utc>,
    /// Duration in minutes. Absent in stored data means 0.
    #[serde(default)]
    pub duration: u32,
    /// ID of the creation-time partner in the opposite lane, if any.
    #[serde(
        rename = "pairId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pair_id: Option<NodeId>,
}

impl Node {
    /// Creates an unpaired node with a generated stable ID.
    pub fn new(content: impl Into<String>, dt: DateTime<Utc>, duration: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            dt,
            duration,
            pair_id: None,
        }
    }

    /// Returns whether this node carries a pairing reference.
    ///
    /// The reference may still dangle; only a lookup in the opposite lane
    /// can tell.
    pub fn is_paired(&self) -> bool {
        self.pair_id.is_some()
    }
}
