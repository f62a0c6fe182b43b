// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership and indexing of every issue in the desk.
//!
//! The registry is the only place an [`Issue`] is mutated. Every mutation goes
//! through [`IssueRegistry::update`], which re-files the issue in the status
//! index and drops it from the waitlist once it stops waiting, so the index,
//! the waitlist and the issues' own status fields never disagree.

use chrono::Utc;
use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::id::{derive_unique_id, IssueId, ISSUE_PREFIX};
use crate::issue::{Category, Issue, IssueStatus};

/// Criteria for [`IssueRegistry::issues_matching`]. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub category: Option<Category>,
    pub raised_by: Option<String>,
    pub transaction_id: Option<String>,
}

impl IssueFilter {
    pub fn status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn raised_by(mut self, email: impl Into<String>) -> Self {
        self.raised_by = Some(email.into());
        self
    }

    pub fn transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Returns true if `issue` satisfies every set criterion.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.status.is_none_or(|s| issue.status() == s)
            && self.category.is_none_or(|c| issue.category == c)
            && self
                .raised_by
                .as_deref()
                .is_none_or(|e| issue.raised_by.eq_ignore_ascii_case(e))
            && self
                .transaction_id
                .as_deref()
                .is_none_or(|t| issue.transaction_id == t)
    }
}

/// Owns all issues, the status index, the waitlist and retry bookkeeping.
#[derive(Debug, Default)]
pub struct IssueRegistry {
    issues: HashMap<IssueId, Issue>,
    /// Creation order, for stable iteration.
    order: Vec<IssueId>,
    /// Ids per status, in the order they entered that status.
    by_status: HashMap<IssueStatus, Vec<IssueId>>,
    waitlist: VecDeque<IssueId>,
    retry_counts: HashMap<IssueId, u32>,
    /// Drain passes an issue has been re-queued by.
    wait_passes: HashMap<IssueId, u32>,
}

impl IssueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises a new issue in [`IssueStatus::Open`] and returns its id.
    pub fn create_issue(
        &mut self,
        transaction_id: &str,
        category: Category,
        subject: &str,
        description: &str,
        raised_by: &str,
    ) -> Result<IssueId> {
        for (field, value) in [
            ("transaction id", transaction_id),
            ("subject", subject),
            ("raiser email", raised_by),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("{} must not be empty", field)));
            }
        }

        let created_at = Utc::now();
        let fields = [
            raised_by.trim(),
            transaction_id.trim(),
            category.as_str(),
            subject.trim(),
        ];
        let id = derive_unique_id(ISSUE_PREFIX, &fields, &created_at, |id| {
            self.issues.contains_key(id)
        });
        let issue = Issue::new(
            id.clone(),
            transaction_id.trim().to_string(),
            category,
            subject.trim().to_string(),
            description.trim().to_string(),
            raised_by.trim().to_string(),
            created_at,
        );

        self.by_status
            .entry(IssueStatus::Open)
            .or_default()
            .push(id.clone());
        self.order.push(id.clone());
        self.issues.insert(id.clone(), issue);
        tracing::info!(issue = %id, category = %category, "issue raised by {}", raised_by);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.issues.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// All issues in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.order.iter().filter_map(|id| self.issues.get(id))
    }

    /// Issues currently in `status`, in the order they entered it.
    pub fn issues_by_status(&self, status: IssueStatus) -> Vec<&Issue> {
        self.by_status
            .get(&status)
            .map(|ids| ids.iter().filter_map(|id| self.issues.get(id)).collect())
            .unwrap_or_default()
    }

    /// Issues matching `filter`, in creation order.
    pub fn issues_matching(&self, filter: &IssueFilter) -> Vec<&Issue> {
        self.iter().filter(|issue| filter.matches(issue)).collect()
    }

    /// Applies `f` to the issue and re-files it if its status changed.
    ///
    /// This is the only path through which an issue is mutated.
    pub fn update<T, F>(&mut self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Issue) -> Result<T>,
    {
        let issue = self
            .issues
            .get_mut(id)
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))?;
        let old = issue.status();
        let result = f(&mut *issue);
        let new = issue.status();

        if old != new {
            self.refile(id, old, new);
        }
        result
    }

    /// Moves an issue to `status`, optionally with a resolution.
    pub fn update_status(
        &mut self,
        id: &str,
        status: IssueStatus,
        resolution: Option<&str>,
    ) -> Result<bool> {
        self.update(id, |issue| issue.update_status(status, resolution))
    }

    /// Marks the issue WAITING and appends it to the waitlist.
    ///
    /// An issue already on the waitlist keeps its position.
    pub fn add_to_waitlist(&mut self, id: &str) -> Result<()> {
        self.update(id, |issue| {
            if !issue.is_assignable() {
                return Err(Error::NotAssignable {
                    id: issue.id.clone(),
                    status: issue.status().to_string(),
                });
            }
            issue.update_status(IssueStatus::Waiting, None).map(|_| ())
        })?;

        if !self.waitlist.iter().any(|w| w == id) {
            self.waitlist.push_back(id.to_string());
            tracing::info!(issue = %id, position = self.waitlist.len(), "issue added to waitlist");
        }
        Ok(())
    }

    /// Pops the head of the waitlist.
    pub fn next_waiting(&mut self) -> Option<IssueId> {
        let next = self.waitlist.pop_front();
        match &next {
            Some(id) => tracing::debug!(issue = %id, "issue taken from waitlist"),
            None => tracing::debug!("waitlist is empty"),
        }
        next
    }

    /// Waitlisted issue ids, head first.
    pub fn waitlist(&self) -> impl Iterator<Item = &str> {
        self.waitlist.iter().map(String::as_str)
    }

    pub fn waitlist_len(&self) -> usize {
        self.waitlist.len()
    }

    pub fn is_waitlisted(&self, id: &str) -> bool {
        self.waitlist.iter().any(|w| w == id)
    }

    /// Counts a rejected assignment attempt and returns the new total.
    pub fn record_retry(&mut self, id: &str) -> u32 {
        let count = self.retry_counts.entry(id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn retry_count(&self, id: &str) -> u32 {
        self.retry_counts.get(id).copied().unwrap_or(0)
    }

    pub fn clear_retries(&mut self, id: &str) {
        self.retry_counts.remove(id);
    }

    /// Counts a drain pass that left the issue waiting and returns the new total.
    pub fn record_wait_pass(&mut self, id: &str) -> u32 {
        let passes = self.wait_passes.entry(id.to_string()).or_insert(0);
        *passes += 1;
        *passes
    }

    pub fn wait_passes(&self, id: &str) -> u32 {
        self.wait_passes.get(id).copied().unwrap_or(0)
    }

    fn refile(&mut self, id: &str, old: IssueStatus, new: IssueStatus) {
        if let Some(ids) = self.by_status.get_mut(&old) {
            ids.retain(|i| i != id);
        }
        self.by_status.entry(new).or_default().push(id.to_string());

        if old == IssueStatus::Waiting {
            self.waitlist.retain(|w| w != id);
            self.wait_passes.remove(id);
        }
        if new.is_terminal() {
            self.retry_counts.remove(id);
        }
    }

    /// Checks the status index and waitlist against the issues themselves.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for issue in self.issues.values() {
            for status in IssueStatus::ALL {
                let listed = self
                    .by_status
                    .get(&status)
                    .is_some_and(|ids| ids.contains(&issue.id));
                assert_eq!(
                    listed,
                    issue.status() == status,
                    "index disagrees for {} ({})",
                    issue.id,
                    status
                );
            }
            let queued = self.waitlist.iter().filter(|w| **w == issue.id).count();
            assert!(queued <= 1, "{} queued {} times", issue.id, queued);
            if queued == 1 {
                assert_eq!(issue.status(), IssueStatus::Waiting);
            }
            assert_eq!(
                issue.status() == IssueStatus::Resolved,
                issue.resolution().is_some()
            );
        }
    }
}

#[cfg(test)]
#[path = "issue_registry_tests.rs"]
mod tests;
