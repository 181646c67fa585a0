//! Error and diagnostic types.
//!
//! Nothing raised while building or querying the index aborts a run. Build
//! problems are collected as [`BuildIssue`] diagnostics on the frozen index;
//! failed lookups are `Resolution::Unresolved` values.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A problem found while building the index. Reported, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum BuildIssue {
    #[error("Malformed {kind} record at position {position}: missing {field}")]
    MalformedRecord {
        position: usize,
        kind: String,
        field: &'static str,
    },

    #[error("Duplicate {kind} '{name}': members merged into the first registration")]
    DuplicateSymbol { kind: &'static str, name: String },

    #[error("Group '{group}' references unknown subgroup '{subgroup}'")]
    UnknownSubgroup { group: String, subgroup: String },

    #[error("Typedef '{name}' aliases itself through a cycle")]
    AliasCycle { name: String },

    #[error("Class '{name}' closes a cycle in its base chain via '{base}'")]
    BaseCycle { name: String, base: String },
}

/// Errors from reading a declaration feed file.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to read feed {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid feed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Error for an unrecognised reference kind hint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown reference kind '{0}' (expected function, enum or any)")]
pub struct UnknownRefKind(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages() {
        let issue = BuildIssue::MalformedRecord {
            position: 3,
            kind: "class".to_string(),
            field: "qualifiedName",
        };
        assert_eq!(
            issue.to_string(),
            "Malformed class record at position 3: missing qualifiedName"
        );
    }

    #[test]
    fn test_issue_serializes_tagged() {
        let issue = BuildIssue::AliasCycle {
            name: "cinder::LoopRef".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["issue"], "alias_cycle");
        assert_eq!(json["name"], "cinder::LoopRef");
    }
}
