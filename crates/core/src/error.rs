// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dk-core operations.

use thiserror::Error;

/// All possible errors that can occur in dk-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("agent not found: {0}")]
    AgentNotFound(String),

    #[error("agent {agent} rejected issue {issue}: {reason}")]
    AssignmentRejected {
        agent: String,
        issue: String,
        reason: String,
    },

    #[error("agent {0} has no active issue\n  hint: only a busy agent can resolve its current issue")]
    NoActiveIssue(String),

    #[error("issue {id} cannot be assigned while {status}")]
    NotAssignable { id: String, status: String },

    #[error("invalid status transition: cannot go from {from} to {to}\n  hint: from '{from}' you can go to: {valid_targets}")]
    InvalidTransition {
        from: String,
        to: String,
        valid_targets: String,
    },

    #[error("resolving issue {0} requires a resolution\n  hint: describe how the issue was resolved")]
    ResolutionRequired(String),

    #[error(
        "invalid category: '{0}'\n  hint: valid categories are: payment, mutual-fund, gold, insurance"
    )]
    InvalidCategory(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: open, waiting, in_progress, resolved")]
    InvalidStatus(String),

    #[error("agent {0} needs at least one area of expertise")]
    EmptyExpertise(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns true for the rejection the engine recovers from by retrying.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::AssignmentRejected { .. })
    }
}

/// A specialized Result type for dk-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
