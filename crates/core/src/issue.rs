// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for the desk ticket router.
//!
//! This module contains the customer-facing ticket entity, its closed set of
//! categories, and the status state machine every ticket moves through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::id::{AgentId, IssueId};

/// Product area a ticket is raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Failed, pending or duplicated payments.
    Payment,
    /// Mutual fund purchases and redemptions.
    MutualFund,
    /// Digital gold.
    Gold,
    /// Insurance policies and claims.
    Insurance,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Payment,
        Category::MutualFund,
        Category::Gold,
        Category::Insurance,
    ];

    /// Returns the code used in configuration and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Payment => "payment",
            Category::MutualFund => "mutual-fund",
            Category::Gold => "gold",
            Category::Insurance => "insurance",
        }
    }

    /// Returns the human-readable label used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Payment => "Payment Related",
            Category::MutualFund => "Mutual Fund Related",
            Category::Gold => "Gold Related",
            Category::Insurance => "Insurance Related",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "payment" => Ok(Category::Payment),
            "mutual-fund" => Ok(Category::MutualFund),
            "gold" => Ok(Category::Gold),
            "insurance" => Ok(Category::Insurance),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Raised, not yet routed. Initial state for new issues.
    Open,
    /// Parked on the waitlist until a qualified agent frees up.
    Waiting,
    /// Held by an agent.
    InProgress,
    /// Closed with a resolution. Terminal.
    Resolved,
}

impl IssueStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Open,
        IssueStatus::Waiting,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
    ];

    /// Returns the string representation used in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::Waiting => "waiting",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
        }
    }

    /// Check if a transition from this status to target is valid.
    pub fn can_transition_to(&self, target: IssueStatus) -> bool {
        use IssueStatus::*;
        matches!(
            (self, target),
            (Open, Waiting)
                | (Open, InProgress)
                | (Open, Resolved)
                | (Waiting, InProgress)
                | (Waiting, Resolved)
                | (InProgress, Resolved)
        )
    }

    /// Get valid transition targets as a formatted string.
    pub fn valid_targets(&self) -> String {
        match self {
            IssueStatus::Open => "waiting, in_progress, resolved (with resolution)".to_string(),
            IssueStatus::Waiting => "in_progress, resolved (with resolution)".to_string(),
            IssueStatus::InProgress => "resolved (with resolution)".to_string(),
            IssueStatus::Resolved => "none (terminal)".to_string(),
        }
    }

    /// Returns true if this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IssueStatus::Resolved)
    }

    /// Returns true if an issue in this status may be handed to an agent.
    pub fn is_assignable(&self) -> bool {
        matches!(self, IssueStatus::Open | IssueStatus::Waiting)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(IssueStatus::Open),
            "waiting" => Ok(IssueStatus::Waiting),
            "in_progress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A customer-reported ticket.
///
/// Status, resolution and assignment are only changed through methods so the
/// resolution/status invariant cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier (format: `iss-{hash}`).
    pub id: IssueId,
    /// Transaction the customer is complaining about.
    pub transaction_id: String,
    /// Product area, used to match agent expertise.
    pub category: Category,
    /// Short summary.
    pub subject: String,
    /// Customer's description of the problem.
    pub description: String,
    /// Email of the customer who raised the issue.
    pub raised_by: String,
    /// When the issue was raised.
    pub created_at: DateTime<Utc>,
    /// When the issue last changed.
    pub updated_at: DateTime<Utc>,
    status: IssueStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assigned_agent: Option<AgentId>,
}

impl Issue {
    /// Creates a new issue in [`IssueStatus::Open`].
    pub fn new(
        id: IssueId,
        transaction_id: String,
        category: Category,
        subject: String,
        description: String,
        raised_by: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Issue {
            id,
            transaction_id,
            category,
            subject,
            description,
            raised_by,
            created_at,
            updated_at: created_at,
            status: IssueStatus::Open,
            resolution: None,
            assigned_agent: None,
        }
    }

    pub fn status(&self) -> IssueStatus {
        self.status
    }

    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    pub fn assigned_agent(&self) -> Option<&str> {
        self.assigned_agent.as_deref()
    }

    /// Returns true if the issue can be handed to an agent right now.
    pub fn is_assignable(&self) -> bool {
        self.status.is_assignable() && self.assigned_agent.is_none()
    }

    /// Moves the issue to `status`.
    ///
    /// Returns `Ok(false)` when the issue is already in `status`. A resolution
    /// is required for, and only accepted with, [`IssueStatus::Resolved`].
    pub fn update_status(&mut self, status: IssueStatus, resolution: Option<&str>) -> Result<bool> {
        if self.status == status {
            return Ok(false);
        }
        if !self.status.can_transition_to(status) {
            return Err(Error::InvalidTransition {
                from: self.status.to_string(),
                to: status.to_string(),
                valid_targets: self.status.valid_targets(),
            });
        }

        let resolution = resolution.map(str::trim).filter(|r| !r.is_empty());
        match (status, resolution) {
            (IssueStatus::Resolved, None) => {
                return Err(Error::ResolutionRequired(self.id.clone()));
            }
            (IssueStatus::Resolved, Some(text)) => self.resolution = Some(text.to_string()),
            (_, Some(_)) => {
                return Err(Error::InvalidInput(format!(
                    "a resolution only applies when resolving, not when moving {} to {}",
                    self.id, status
                )));
            }
            (_, None) => {}
        }

        let old = self.status;
        self.status = status;
        self.updated_at = Utc::now();
        tracing::info!(issue = %self.id, "status {} -> {}", old, status);
        Ok(true)
    }

    /// Links the issue to `agent_id` and moves it to [`IssueStatus::InProgress`].
    pub fn assign_to_agent(&mut self, agent_id: &str) -> Result<()> {
        if !self.is_assignable() {
            return Err(Error::NotAssignable {
                id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        self.update_status(IssueStatus::InProgress, None)?;
        self.assigned_agent = Some(agent_id.to_string());
        tracing::debug!(issue = %self.id, agent = %agent_id, "issue linked to agent");
        Ok(())
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
