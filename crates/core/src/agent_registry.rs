// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership of agents and availability queries.

use chrono::Utc;
use serde::Serialize;

use crate::agent::Agent;
use crate::error::{Error, Result};
use crate::id::{derive_unique_id, AgentId, IssueId, AGENT_PREFIX};
use crate::issue::Category;

/// The issues one agent has worked on, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkHistory {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub issues: Vec<IssueId>,
}

/// Owns all agents in registration order.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a free agent and returns its id.
    pub fn add_agent(
        &mut self,
        email: &str,
        name: &str,
        expertise: impl IntoIterator<Item = Category>,
    ) -> Result<AgentId> {
        if email.trim().is_empty() || name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "agent email and name must not be empty".to_string(),
            ));
        }
        if self
            .agents
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(email.trim()))
        {
            return Err(Error::InvalidInput(format!(
                "an agent with email {} is already registered",
                email.trim()
            )));
        }

        let created_at = Utc::now();
        let id = derive_unique_id(AGENT_PREFIX, &[email.trim()], &created_at, |id| {
            self.agents.iter().any(|a| a.id == id)
        });
        let agent = Agent::new(
            id.clone(),
            email.trim().to_string(),
            name.trim().to_string(),
            expertise,
            created_at,
        )?;

        let skills: Vec<_> = agent.expertise().iter().map(|c| c.as_str()).collect();
        tracing::info!(agent = %id, "agent {} added with expertise in {}", agent.name, skills.join(", "));
        self.agents.push(agent);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    /// Looks up an agent by email, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&Agent> {
        self.agents
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    /// All agents in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Free agents qualified for `category`, in registration order.
    pub fn free_agents(&self, category: Category) -> Vec<&Agent> {
        let free: Vec<&Agent> = self.agents.iter().filter(|a| a.can_take(category)).collect();
        tracing::debug!(category = %category, "found {} free agents", free.len());
        free
    }

    /// Work history of every agent, in registration order.
    pub fn work_history(&self) -> Vec<WorkHistory> {
        self.agents
            .iter()
            .map(|a| WorkHistory {
                agent_id: a.id.clone(),
                agent_name: a.name.clone(),
                issues: a.work_history().to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "agent_registry_tests.rs"]
mod tests;
