// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The assignment engine: matching, retries and waitlist draining.
//!
//! Matching is split in two. [`AssignmentStrategy`] picks one agent out of the
//! free, qualified candidates; [`AssignmentEngine`] owns the policy around it
//! (waitlisting when nobody qualifies, bounded retries when the chosen agent
//! rejects the issue, and draining the waitlist one pass at a time).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::agent::Agent;
use crate::agent_registry::AgentRegistry;
use crate::error::{Error, Result};
use crate::id::{AgentId, IssueId};
use crate::issue::{Issue, IssueStatus};
use crate::issue_registry::IssueRegistry;

/// Default ceiling on assignment attempts in [`AssignmentEngine::try_assign`].
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Picks an agent for an issue out of the free, qualified candidates.
pub trait AssignmentStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the chosen agent, or `None` to leave the issue waiting.
    ///
    /// `candidates` is never empty and is in registration order.
    fn select(&self, issue: &Issue, candidates: &[&Agent]) -> Option<AgentId>;
}

/// Chooses the candidate with the shortest work history.
///
/// Ties go to the earliest registered agent, which spreads work evenly and
/// keeps the choice deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoaded;

impl AssignmentStrategy for LeastLoaded {
    fn name(&self) -> &'static str {
        "least-loaded"
    }

    fn select(&self, _issue: &Issue, candidates: &[&Agent]) -> Option<AgentId> {
        candidates
            .iter()
            .min_by_key(|agent| agent.work_history().len())
            .map(|agent| agent.id.clone())
    }
}

/// Tunables for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Assignment attempts per [`AssignmentEngine::try_assign`] call before
    /// the issue is waitlisted.
    pub max_retries: u32,
    /// Drain passes after which a still-waiting issue is reported as escalated.
    /// `None` lets issues wait indefinitely without escalation.
    pub escalate_after: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_retries: DEFAULT_MAX_RETRIES,
            escalate_after: None,
        }
    }
}

/// Outcome of routing one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The issue is now held by `agent_id`.
    Assigned { agent_id: AgentId },
    /// The issue is WAITING on the waitlist.
    Queued,
}

impl Assignment {
    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Assignment::Assigned { agent_id } => Some(agent_id),
            Assignment::Queued => None,
        }
    }
}

/// What one drain pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Waitlist entries examined.
    pub attempted: usize,
    /// Issues handed to an agent, with the agent.
    pub assigned: Vec<(IssueId, AgentId)>,
    /// Issues that went back to the waitlist.
    pub requeued: Vec<IssueId>,
    /// Requeued issues that have waited through `escalate_after` passes or more.
    pub escalated: Vec<IssueId>,
}

impl DrainReport {
    pub fn is_empty(&self) -> bool {
        self.attempted == 0
    }
}

/// Routes issues to agents.
pub struct AssignmentEngine {
    config: EngineConfig,
    strategy: Box<dyn AssignmentStrategy>,
}

impl fmt::Debug for AssignmentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignmentEngine")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        AssignmentEngine::new(EngineConfig::default())
    }
}

impl AssignmentEngine {
    /// Creates an engine using the [`LeastLoaded`] strategy.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_strategy(config, Box::new(LeastLoaded))
    }

    pub fn with_strategy(config: EngineConfig, strategy: Box<dyn AssignmentStrategy>) -> Self {
        AssignmentEngine { config, strategy }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Makes a single attempt to route the issue.
    ///
    /// With no free, qualified agent (or when the strategy declines) the issue
    /// is waitlisted and [`Assignment::Queued`] returned. If the chosen agent
    /// refuses, [`Error::AssignmentRejected`] is returned and neither side is
    /// mutated.
    pub fn assign(
        &self,
        issues: &mut IssueRegistry,
        agents: &mut AgentRegistry,
        issue_id: &str,
    ) -> Result<Assignment> {
        let issue = issues
            .get(issue_id)
            .ok_or_else(|| Error::IssueNotFound(issue_id.to_string()))?;
        if !issue.is_assignable() {
            return Err(Error::NotAssignable {
                id: issue_id.to_string(),
                status: issue.status().to_string(),
            });
        }

        let candidates = agents.free_agents(issue.category);
        let chosen = if candidates.is_empty() {
            None
        } else {
            self.strategy.select(issue, &candidates)
        };

        let Some(agent_id) = chosen else {
            issues.add_to_waitlist(issue_id)?;
            tracing::info!(issue = %issue_id, "no free agent available, issue waitlisted");
            return Ok(Assignment::Queued);
        };

        let agent = agents
            .get_mut(&agent_id)
            .ok_or_else(|| Error::AgentNotFound(agent_id.clone()))?;
        issues.update(issue_id, |issue| agent.assign_issue(issue))?;
        Ok(Assignment::Assigned { agent_id })
    }

    /// Routes the issue, retrying rejected attempts up to `max_retries` in total.
    ///
    /// Once the attempts are used up the issue is waitlisted and its retry
    /// counter dropped. Errors other than a rejection are returned as is.
    pub fn try_assign(
        &self,
        issues: &mut IssueRegistry,
        agents: &mut AgentRegistry,
        issue_id: &str,
    ) -> Result<Assignment> {
        loop {
            match self.assign(issues, agents, issue_id) {
                Ok(outcome) => {
                    issues.clear_retries(issue_id);
                    return Ok(outcome);
                }
                Err(err) if err.is_rejection() => {
                    let attempts = issues.record_retry(issue_id);
                    tracing::warn!(issue = %issue_id, "failed to assign issue: {}", err);
                    if attempts < self.config.max_retries {
                        tracing::info!(issue = %issue_id, attempt = attempts, "retrying assignment");
                        continue;
                    }
                    tracing::error!(
                        issue = %issue_id,
                        "max retries reached after {} attempts, adding to waitlist",
                        attempts
                    );
                    issues.clear_retries(issue_id);
                    issues.add_to_waitlist(issue_id)?;
                    return Ok(Assignment::Queued);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Runs one pass over the waitlist.
    ///
    /// Only the entries present when the pass starts are examined, each once;
    /// issues that still cannot be placed go back to the tail. Entries whose
    /// issue stopped waiting in the meantime are dropped.
    pub fn drain_waitlist(
        &self,
        issues: &mut IssueRegistry,
        agents: &mut AgentRegistry,
    ) -> DrainReport {
        let mut report = DrainReport::default();
        let pending = issues.waitlist_len();

        for _ in 0..pending {
            let Some(issue_id) = issues.next_waiting() else {
                break;
            };
            if issues.get(&issue_id).map(Issue::status) != Some(IssueStatus::Waiting) {
                tracing::debug!(issue = %issue_id, "dropping stale waitlist entry");
                continue;
            }

            report.attempted += 1;
            match self.assign(issues, agents, &issue_id) {
                Ok(Assignment::Assigned { agent_id }) => {
                    report.assigned.push((issue_id, agent_id));
                }
                Ok(Assignment::Queued) => self.requeued(issues, issue_id, &mut report),
                Err(err) => {
                    if err.is_rejection() {
                        tracing::warn!(issue = %issue_id, "reassignment rejected: {}", err);
                    } else {
                        tracing::error!(issue = %issue_id, "reassignment failed: {}", err);
                    }
                    self.put_back(issues, issue_id, &mut report);
                }
            }
        }

        if !report.is_empty() {
            tracing::info!(
                attempted = report.attempted,
                assigned = report.assigned.len(),
                requeued = report.requeued.len(),
                "waitlist drained"
            );
        }
        report
    }

    /// Returns a popped entry to the tail after a failed attempt, as long as
    /// the issue is still waiting.
    fn put_back(&self, issues: &mut IssueRegistry, issue_id: IssueId, report: &mut DrainReport) {
        if issues.get(&issue_id).map(Issue::status) != Some(IssueStatus::Waiting) {
            tracing::debug!(issue = %issue_id, "issue left the waitlist during the attempt");
            return;
        }
        match issues.add_to_waitlist(&issue_id) {
            Ok(()) => self.requeued(issues, issue_id, report),
            Err(err) => tracing::error!(issue = %issue_id, "cannot requeue issue: {}", err),
        }
    }

    fn requeued(&self, issues: &mut IssueRegistry, issue_id: IssueId, report: &mut DrainReport) {
        let passes = issues.record_wait_pass(&issue_id);
        if let Some(limit) = self.config.escalate_after {
            if passes >= limit {
                tracing::warn!(issue = %issue_id, passes, "issue still waiting, escalating");
                report.escalated.push(issue_id.clone());
            }
        }
        report.requeued.push(issue_id);
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
