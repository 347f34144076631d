//! Raw input validation for the add operation.
//!
//! # Responsibility
//! - Turn untrusted caller input into a validated draft node.
//! - Reject empty content and unparseable timestamps before any mutation.
//!
//! # Invariants
//! - A `NodeDraft` always holds trimmed, non-empty content and a parsed
//!   timestamp; the chain store relies on this and re-validates nothing.

use crate::model::node::Node;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Naive formats accepted from datetime-local style inputs.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Validation failure for raw add input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeInputError {
    /// Content was empty or whitespace-only.
    EmptyContent,
    /// Timestamp text did not parse in any accepted format.
    InvalidTimestamp(String),
}

impl Display for NodeInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "node content must not be empty"),
            Self::InvalidTimestamp(raw) => write!(f, "invalid node timestamp: `{raw}`"),
        }
    }
}

impl Error for NodeInputError {}

/// Raw, unvalidated input as collected from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInput {
    /// Entry text; trimmed during validation.
    pub content: String,
    /// Timestamp text; RFC 3339 or naive `YYYY-MM-DDTHH:MM[:SS]`.
    pub dt: String,
    /// Duration in minutes; absent means 0.
    pub duration: Option<u32>,
}

impl NodeInput {
    pub fn new(
        content: impl Into<String>,
        dt: impl Into<String>,
        duration: Option<u32>,
    ) -> Self {
        Self {
            content: content.into(),
            dt: dt.into(),
            duration,
        }
    }

    /// Validates this input into a draft the chain store accepts as-is.
    ///
    /// # Errors
    /// - `EmptyContent` when the trimmed content is empty.
    /// - `InvalidTimestamp` when the timestamp parses in no accepted format.
    pub fn validate(&self) -> Result<NodeDraft, NodeInputError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(NodeInputError::EmptyContent);
        }

        let dt = parse_timestamp(&self.dt)
            .ok_or_else(|| NodeInputError::InvalidTimestamp(self.dt.clone()))?;

        Ok(NodeDraft {
            content: content.to_string(),
            dt,
            duration: self.duration.unwrap_or(0),
        })
    }
}

/// Validated payload for one add operation. Carries everything a new node
/// needs except identity and pairing, which the chain store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDraft {
    pub content: String,
    pub dt: DateTime<Utc>,
    pub duration: u32,
}

impl NodeDraft {
    /// Materializes one unpaired node with a fresh ID.
    pub fn into_node(self) -> Node {
        Node::new(self.content, self.dt, self.duration)
    }
}

/// Parses RFC 3339 first, then naive datetime-local formats as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, NodeInput, NodeInputError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn validate_trims_content_and_defaults_duration() {
        let input = NodeInput::new("  standup  ", "2024-01-01T09:00", None);
        let draft = input.validate().expect("valid input");
        assert_eq!(draft.content, "standup");
        assert_eq!(draft.duration, 0);
        assert_eq!(draft.dt, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn validate_rejects_whitespace_only_content() {
        let input = NodeInput::new("   ", "2024-01-01T09:00", Some(30));
        assert_eq!(input.validate().unwrap_err(), NodeInputError::EmptyContent);
    }

    #[test]
    fn validate_rejects_unparseable_timestamp() {
        let input = NodeInput::new("standup", "yesterday-ish", Some(30));
        assert_eq!(
            input.validate().unwrap_err(),
            NodeInputError::InvalidTimestamp("yesterday-ish".to_string())
        );
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T09:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T09:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T09:00"), Some(expected));
        assert_eq!(parse_timestamp(""), None);
    }
}
