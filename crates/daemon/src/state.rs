// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared desk state.
//!
//! One lock guards the whole desk. Each method takes it for exactly one
//! logical operation and returns owned values, so no guard escapes.

use std::sync::Arc;

use tokio::sync::Mutex;

use dk_core::{
    AgentId, Assignment, Category, Desk, DrainReport, Issue, IssueId, IssueStatus, User,
    WorkHistory,
};

use crate::error::Result;

#[derive(Clone)]
pub struct DeskState {
    inner: Arc<Mutex<Desk>>,
}

impl DeskState {
    pub fn new(desk: Desk) -> Self {
        DeskState {
            inner: Arc::new(Mutex::new(desk)),
        }
    }

    pub async fn raise_issue(
        &self,
        user: &User,
        transaction_id: &str,
        category: Category,
        subject: &str,
        description: &str,
    ) -> Result<IssueId> {
        let mut desk = self.inner.lock().await;
        Ok(user.raise_issue(&mut desk, transaction_id, category, subject, description)?)
    }

    /// Routes one issue, retries included, in a single critical section.
    pub async fn try_assign(&self, issue_id: &str) -> Result<Assignment> {
        let mut desk = self.inner.lock().await;
        Ok(desk.try_assign(issue_id)?)
    }

    pub async fn drain_waitlist(&self) -> DrainReport {
        self.inner.lock().await.drain_waitlist()
    }

    pub async fn resolve_current_issue(&self, agent_id: &str, resolution: &str) -> Result<IssueId> {
        let mut desk = self.inner.lock().await;
        Ok(desk.resolve_current_issue(agent_id, resolution)?)
    }

    pub async fn busy_agents(&self) -> Vec<AgentId> {
        self.inner.lock().await.busy_agents()
    }

    pub async fn issues_by_status(&self, status: IssueStatus) -> Vec<Issue> {
        self.inner
            .lock()
            .await
            .issues_by_status(status)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn waitlist(&self) -> Vec<IssueId> {
        self.inner.lock().await.waitlist()
    }

    pub async fn work_history(&self) -> Vec<WorkHistory> {
        self.inner.lock().await.agent_work_history()
    }

    /// Holds the desk lock until the guard drops.
    #[cfg(test)]
    pub(crate) async fn lock(&self) -> tokio::sync::MutexGuard<'_, Desk> {
        self.inner.lock().await
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
