//! Archive/restore lifecycle shared by every soft-deletable entity.
//!
//! Sponsors, deals, deliverables, tickets, and claims all carry an
//! `archived_at` column: NULL means active, non-NULL means archived. Nothing
//! is ever hard-deleted; visibility is a read-time filter
//! (`include_archived`), not a lifecycle constraint. This module owns the
//! transition rules so each entity kind does not re-implement them.

use crate::types::Timestamp;

/// The two lifecycle states derived from `archived_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Active,
    Archived,
}

/// A lifecycle operation requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    Archive,
    Restore,
}

impl LifecycleOp {
    /// Activity-log action name for this operation.
    pub fn action(&self) -> &'static str {
        match self {
            LifecycleOp::Archive => "archived",
            LifecycleOp::Restore => "restored",
        }
    }
}

/// Result of applying a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The `archived_at` value after the operation.
    pub archived_at: Option<Timestamp>,
    /// Whether the operation changed state. Both operations are idempotent
    /// no-ops when the record is already in the target state.
    pub changed: bool,
}

pub fn state(archived_at: Option<Timestamp>) -> LifecycleState {
    match archived_at {
        None => LifecycleState::Active,
        Some(_) => LifecycleState::Archived,
    }
}

/// Apply `op` to a record currently at `archived_at`.
///
/// Archiving an already-archived record keeps the original timestamp;
/// restoring an active record is a no-op.
pub fn apply(op: LifecycleOp, archived_at: Option<Timestamp>, now: Timestamp) -> Transition {
    match (op, archived_at) {
        (LifecycleOp::Archive, None) => Transition {
            archived_at: Some(now),
            changed: true,
        },
        (LifecycleOp::Archive, Some(at)) => Transition {
            archived_at: Some(at),
            changed: false,
        },
        (LifecycleOp::Restore, Some(_)) => Transition {
            archived_at: None,
            changed: true,
        },
        (LifecycleOp::Restore, None) => Transition {
            archived_at: None,
            changed: false,
        },
    }
}
