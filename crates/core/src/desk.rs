// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The desk: both registries plus the engine, as one unit of consistency.
//!
//! Issues and agents reference each other, so every operation that touches
//! either goes through a `&mut Desk`. Callers that share a desk across tasks
//! put the whole value behind a single lock and hold it for one operation.

use crate::agent::Agent;
use crate::agent_registry::{AgentRegistry, WorkHistory};
use crate::engine::{Assignment, AssignmentEngine, AssignmentStrategy, DrainReport, EngineConfig};
use crate::error::{Error, Result};
use crate::id::{AgentId, IssueId};
use crate::issue::{Category, Issue, IssueStatus};
use crate::issue_registry::{IssueFilter, IssueRegistry};

#[derive(Debug, Default)]
pub struct Desk {
    issues: IssueRegistry,
    agents: AgentRegistry,
    engine: AssignmentEngine,
}

impl Desk {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_engine(AssignmentEngine::new(config))
    }

    pub fn with_strategy(config: EngineConfig, strategy: Box<dyn AssignmentStrategy>) -> Self {
        Self::with_engine(AssignmentEngine::with_strategy(config, strategy))
    }

    fn with_engine(engine: AssignmentEngine) -> Self {
        Desk {
            issues: IssueRegistry::new(),
            agents: AgentRegistry::new(),
            engine,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    pub fn add_agent(
        &mut self,
        email: &str,
        name: &str,
        expertise: impl IntoIterator<Item = Category>,
    ) -> Result<AgentId> {
        self.agents.add_agent(email, name, expertise)
    }

    /// Raises a new OPEN issue. Routing is a separate step ([`Desk::try_assign`]).
    pub fn create_issue(
        &mut self,
        transaction_id: &str,
        category: Category,
        subject: &str,
        description: &str,
        raiser_email: &str,
    ) -> Result<IssueId> {
        self.issues
            .create_issue(transaction_id, category, subject, description, raiser_email)
    }

    /// Single routing attempt, see [`AssignmentEngine::assign`].
    pub fn assign(&mut self, issue_id: &str) -> Result<Assignment> {
        self.engine
            .assign(&mut self.issues, &mut self.agents, issue_id)
    }

    /// Routing with bounded retries, see [`AssignmentEngine::try_assign`].
    pub fn try_assign(&mut self, issue_id: &str) -> Result<Assignment> {
        self.engine
            .try_assign(&mut self.issues, &mut self.agents, issue_id)
    }

    /// One pass over the waitlist, see [`AssignmentEngine::drain_waitlist`].
    pub fn drain_waitlist(&mut self) -> DrainReport {
        self.engine
            .drain_waitlist(&mut self.issues, &mut self.agents)
    }

    /// Resolves the agent's current issue and frees the agent.
    ///
    /// # Errors
    ///
    /// [`Error::AgentNotFound`] for an unknown agent, [`Error::NoActiveIssue`]
    /// if the agent holds nothing, [`Error::ResolutionRequired`] for blank text.
    pub fn resolve_current_issue(&mut self, agent_id: &str, resolution: &str) -> Result<IssueId> {
        let agent = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| Error::AgentNotFound(agent_id.to_string()))?;
        let issue_id = agent
            .current_issue()
            .ok_or_else(|| Error::NoActiveIssue(agent_id.to_string()))?
            .to_string();
        self.issues.update(&issue_id, |issue| {
            agent.resolve_current_issue(issue, resolution)
        })
    }

    /// Resolves an issue by id.
    ///
    /// A held issue is resolved through its agent, which frees the agent. An
    /// unassigned one (open or waiting) is resolved directly and leaves the
    /// waitlist. Resolving a resolved issue is a no-op.
    pub fn resolve_issue(&mut self, issue_id: &str, resolution: &str) -> Result<()> {
        let issue = self
            .issues
            .get(issue_id)
            .ok_or_else(|| Error::IssueNotFound(issue_id.to_string()))?;

        let held_by = match issue.status() {
            IssueStatus::InProgress => issue.assigned_agent().map(str::to_string),
            _ => None,
        };

        match held_by {
            Some(agent_id) => self.resolve_current_issue(&agent_id, resolution).map(|_| ()),
            None => self
                .issues
                .update_status(issue_id, IssueStatus::Resolved, Some(resolution))
                .map(|_| ()),
        }
    }

    pub fn issue(&self, issue_id: &str) -> Option<&Issue> {
        self.issues.get(issue_id)
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.get(agent_id)
    }

    pub fn agent_by_email(&self, email: &str) -> Option<&Agent> {
        self.agents.find_by_email(email)
    }

    /// All issues in creation order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// All agents in registration order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn issues_by_status(&self, status: IssueStatus) -> Vec<&Issue> {
        self.issues.issues_by_status(status)
    }

    pub fn issues_matching(&self, filter: &IssueFilter) -> Vec<&Issue> {
        self.issues.issues_matching(filter)
    }

    /// Waitlisted issue ids, head first.
    pub fn waitlist(&self) -> Vec<IssueId> {
        self.issues.waitlist().map(str::to_string).collect()
    }

    pub fn agent_work_history(&self) -> Vec<WorkHistory> {
        self.agents.work_history()
    }

    /// Ids of agents currently holding an issue.
    pub fn busy_agents(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|a| a.current_issue().is_some())
            .map(|a| a.id.clone())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn registries(&self) -> (&IssueRegistry, &AgentRegistry) {
        (&self.issues, &self.agents)
    }
}

#[cfg(test)]
#[path = "desk_tests.rs"]
mod tests;
