//! Structured operation outcomes
//!
//! The devices signal refused or degenerate operations by value rather than
//! by error: callers and tests inspect the [`Outcome`] classification and the
//! diagnostic text instead of capturing log output.

use serde::{Deserialize, Serialize};

/// Classification of a device operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The operation was applied and the transition took effect.
    Accepted,
    /// The operation was valid but the device was already in the requested
    /// state; nothing changed.
    NoOp,
    /// A guard refused the operation; state is unchanged.
    Rejected,
    /// Overlapping requests were detected and the device entered its fault
    /// state.
    Conflict,
}

/// Outcome plus human-readable diagnostic for one device operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpReport {
    pub outcome: Outcome,
    pub detail: String,
}

impl OpReport {
    pub fn accepted(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Accepted,
            detail: detail.into(),
        }
    }

    pub fn noop(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::NoOp,
            detail: detail.into(),
        }
    }

    pub fn rejected(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Rejected,
            detail: detail.into(),
        }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Conflict,
            detail: detail.into(),
        }
    }

    /// True when the transition was applied (self-transitions included).
    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }

    /// True when the operation left the device untouched.
    pub fn is_refused(&self) -> bool {
        matches!(self.outcome, Outcome::Rejected | Outcome::NoOp)
    }
}

impl std::fmt::Display for OpReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.outcome {
            Outcome::Accepted => "ok",
            Outcome::NoOp => "noop",
            Outcome::Rejected => "rejected",
            Outcome::Conflict => "conflict",
        };
        write!(f, "[{}] {}", tag, self.detail)
    }
}
