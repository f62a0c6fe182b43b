// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Support agents and their availability state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::id::{AgentId, IssueId};
use crate::issue::{Category, Issue, IssueStatus};

/// Availability of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Ready to take an issue.
    Free,
    /// Holding exactly one issue.
    Busy,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Free => "free",
            AgentStatus::Busy => "busy",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A support staff member who resolves issues within their expertise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier (format: `agt-{hash}`).
    pub id: AgentId,
    /// Contact email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// When the agent was registered.
    pub created_at: DateTime<Utc>,
    expertise: BTreeSet<Category>,
    status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_issue: Option<IssueId>,
    work_history: Vec<IssueId>,
}

impl Agent {
    /// Creates a free agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExpertise`] if `expertise` yields no category.
    pub fn new(
        id: AgentId,
        email: String,
        name: String,
        expertise: impl IntoIterator<Item = Category>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let expertise: BTreeSet<Category> = expertise.into_iter().collect();
        if expertise.is_empty() {
            return Err(Error::EmptyExpertise(name));
        }
        Ok(Agent {
            id,
            email,
            name,
            created_at,
            expertise,
            status: AgentStatus::Free,
            current_issue: None,
            work_history: Vec::new(),
        })
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn expertise(&self) -> &BTreeSet<Category> {
        &self.expertise
    }

    pub fn current_issue(&self) -> Option<&str> {
        self.current_issue.as_deref()
    }

    /// Every issue ever assigned to this agent, oldest first.
    pub fn work_history(&self) -> &[IssueId] {
        &self.work_history
    }

    pub fn handles(&self, category: Category) -> bool {
        self.expertise.contains(&category)
    }

    /// Returns true if the agent is free and qualified for `category`.
    pub fn can_take(&self, category: Category) -> bool {
        self.status == AgentStatus::Free && self.handles(category)
    }

    /// Takes `issue` as the current assignment.
    ///
    /// Fails with [`Error::AssignmentRejected`] when the agent is busy or lacks
    /// the issue's category. Nothing is mutated on failure.
    pub fn assign_issue(&mut self, issue: &mut Issue) -> Result<()> {
        if let Some(current) = &self.current_issue {
            return Err(self.rejection(issue, format!("busy with {}", current)));
        }
        if !self.handles(issue.category) {
            return Err(self.rejection(issue, format!("no expertise in {}", issue.category)));
        }

        issue.assign_to_agent(&self.id)?;
        self.current_issue = Some(issue.id.clone());
        self.status = AgentStatus::Busy;
        self.work_history.push(issue.id.clone());
        tracing::info!(issue = %issue.id, agent = %self.id, "issue assigned to agent {}", self.name);
        Ok(())
    }

    /// Resolves the current issue with `resolution` and frees the agent.
    ///
    /// `issue` must be the agent's current issue. Returns its id.
    pub fn resolve_current_issue(&mut self, issue: &mut Issue, resolution: &str) -> Result<IssueId> {
        let current = self
            .current_issue
            .as_deref()
            .ok_or_else(|| Error::NoActiveIssue(self.id.clone()))?;
        if current != issue.id {
            return Err(Error::InvalidInput(format!(
                "agent {} holds {}, not {}",
                self.id, current, issue.id
            )));
        }

        issue.update_status(IssueStatus::Resolved, Some(resolution))?;
        self.status = AgentStatus::Free;
        self.current_issue = None;
        tracing::info!(issue = %issue.id, agent = %self.id, "agent {} resolved issue", self.name);
        Ok(issue.id.clone())
    }

    fn rejection(&self, issue: &Issue, reason: String) -> Error {
        Error::AssignmentRejected {
            agent: self.id.clone(),
            issue: issue.id.clone(),
            reason,
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
