//! Immutable summary of one synchronization run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kinds named in report issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    Post,
    Authored,
    FriendOf,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Person => "person",
            Self::Post => "post",
            Self::Authored => "authored-edge",
            Self::FriendOf => "friend-edge",
        };
        f.write_str(name)
    }
}

/// Classification of a recorded, non-fatal problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// Edge upsert attempted against a missing endpoint node.
    DanglingReference,
    /// The store reported a uniqueness conflict despite upsert semantics;
    /// indicates an identity-mapping bug, not a data problem.
    DuplicateViolation,
    /// A single upsert failed and the run continued without it.
    UpsertFailed,
}

/// One recorded problem from a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncIssue {
    pub entity: EntityKind,
    /// Source identity; pairs render as `"1->10"` / `"{1,2}"`.
    pub source_id: String,
    pub kind: IssueKind,
    pub reason: String,
}

/// Result of a sync (or reset) run, returned to the caller.
///
/// Fatal failures abort the run and never produce a report; everything
/// recorded here is non-fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub nodes_created: usize,
    pub nodes_updated: usize,
    pub edges_created: usize,
    pub edges_skipped: usize,
    pub issues: Vec<SyncIssue>,
}

impl SyncReport {
    pub fn record(&mut self, entity: EntityKind, source_id: impl Into<String>, kind: IssueKind, reason: impl Into<String>) {
        self.issues.push(SyncIssue {
            entity,
            source_id: source_id.into(),
            kind,
            reason: reason.into(),
        });
    }

    /// True when every write resolved cleanly.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.edges_skipped == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates_issues() {
        let mut report = SyncReport::default();
        assert!(report.is_clean());

        report.record(EntityKind::Authored, "1->10", IssueKind::DanglingReference, "no Person node 1");
        report.record(EntityKind::Person, "5", IssueKind::UpsertFailed, "boom");

        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0].kind, IssueKind::DanglingReference);
        assert!(!report.is_clean());
    }
}
