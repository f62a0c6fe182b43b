// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The driver run: users raise issues, the desk routes them, agents resolve.

use std::sync::Arc;

use dk_core::{Assignment, IssueId};

use crate::error::Result;
use crate::seed::Workload;
use crate::state::DeskState;

/// Raises every workload's issues, one task per user.
///
/// Ids come back grouped by workload in input order, each group in the
/// order its user raised them.
pub async fn raise_all(state: &DeskState, workloads: Vec<Workload>) -> Result<Vec<IssueId>> {
    let tasks: Vec<_> = workloads
        .into_iter()
        .map(|workload| {
            let state = state.clone();
            tokio::spawn(async move {
                let mut ids = Vec::with_capacity(workload.issues.len());
                for issue in &workload.issues {
                    let id = state
                        .raise_issue(
                            &workload.user,
                            &issue.transaction_id,
                            issue.category,
                            &issue.subject,
                            &issue.description,
                        )
                        .await?;
                    ids.push(id);
                }
                Result::Ok(ids)
            })
        })
        .collect();

    let mut raised = Vec::new();
    for task in tasks {
        raised.extend(task.await??);
    }
    Ok(raised)
}

/// Routes each issue in turn. Unplaced issues end up on the waitlist.
pub async fn assign_all(state: &DeskState, ids: &[IssueId]) -> Result<Vec<Assignment>> {
    let mut outcomes = Vec::with_capacity(ids.len());
    for id in ids {
        outcomes.push(state.try_assign(id).await?);
    }
    Ok(outcomes)
}

/// Has every busy agent resolve its current issue, concurrently.
///
/// Returns the resolved issue ids in agent registration order.
pub async fn resolve_busy(state: &DeskState, resolution: &str) -> Result<Vec<IssueId>> {
    let resolution: Arc<str> = Arc::from(resolution);
    let tasks: Vec<_> = state
        .busy_agents()
        .await
        .into_iter()
        .map(|agent_id| {
            let state = state.clone();
            let resolution = Arc::clone(&resolution);
            tokio::spawn(async move { state.resolve_current_issue(&agent_id, &resolution).await })
        })
        .collect();

    let mut resolved = Vec::with_capacity(tasks.len());
    for task in tasks {
        resolved.push(task.await??);
    }
    Ok(resolved)
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
