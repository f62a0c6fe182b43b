// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Seed data: the agents, users and issues a run starts from.
//!
//! ```json
//! { "agents": [{"email": "...", "name": "...", "expertise": ["payment"]}],
//!   "users":  [{"email": "...", "name": "..."}],
//!   "issues": [{"raised_by": "...", "transaction_id": "T1", "category": "payment",
//!               "subject": "...", "description": "..."}] }
//! ```
//!
//! When `issues` is absent the first user raises the demo issues from
//! [`demo_issues`]; an empty list raises nothing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use dk_core::{AgentId, Category, Desk, User};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub agents: Vec<AgentSeed>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub issues: Option<Vec<IssueSeed>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSeed {
    pub email: String,
    pub name: String,
    pub expertise: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueSeed {
    pub raised_by: String,
    pub transaction_id: String,
    pub category: Category,
    pub subject: String,
    #[serde(default)]
    pub description: String,
}

/// The issues one user raises, in file order.
#[derive(Debug, Clone)]
pub struct Workload {
    pub user: User,
    pub issues: Vec<IssueSeed>,
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: Seed = serde_json::from_str(&content).map_err(|source| Error::SeedFormat {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            agents = seed.agents.len(),
            users = seed.users.len(),
            "loaded seed from {}",
            path.display()
        );
        Ok(seed)
    }

    /// Registers every seeded agent on `desk`, in file order.
    pub fn register_agents(&self, desk: &mut Desk) -> Result<Vec<AgentId>> {
        self.agents
            .iter()
            .map(|a| {
                desk.add_agent(&a.email, &a.name, a.expertise.iter().copied())
                    .map_err(Error::from)
            })
            .collect()
    }

    pub fn users(&self) -> Result<Vec<User>> {
        let mut seen = HashSet::new();
        let mut users = Vec::with_capacity(self.users.len());
        for entry in &self.users {
            let user = User::new(&entry.email, &entry.name)?;
            if !seen.insert(user.email.to_lowercase()) {
                return Err(Error::Seed(format!("user {} is listed twice", user.email)));
            }
            users.push(user);
        }
        Ok(users)
    }

    /// Groups the seeded issues by the user raising them, in user order.
    ///
    /// Users without issues are omitted.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownUser`] if an issue names a user the seed does not list.
    pub fn workloads(&self) -> Result<Vec<Workload>> {
        let users = self.users()?;
        let issues = match &self.issues {
            Some(issues) => issues.clone(),
            None => match users.first() {
                Some(user) => demo_issues(&user.email),
                None => Vec::new(),
            },
        };

        let mut workloads: Vec<Workload> = users
            .into_iter()
            .map(|user| Workload {
                user,
                issues: Vec::new(),
            })
            .collect();
        for issue in issues {
            let owner = workloads
                .iter_mut()
                .find(|w| w.user.email.eq_ignore_ascii_case(issue.raised_by.trim()))
                .ok_or_else(|| Error::UnknownUser(issue.raised_by.clone()))?;
            owner.issues.push(issue);
        }
        workloads.retain(|w| !w.issues.is_empty());
        Ok(workloads)
    }
}

/// Two payment issues and one mutual fund issue raised by `email`.
pub fn demo_issues(email: &str) -> Vec<IssueSeed> {
    let issue = |txn: &str, category, subject: &str, description: &str| IssueSeed {
        raised_by: email.to_string(),
        transaction_id: txn.to_string(),
        category,
        subject: subject.to_string(),
        description: description.to_string(),
    };
    vec![
        issue(
            "T1",
            Category::Payment,
            "Payment Failed",
            "My payment failed but money is debited",
        ),
        issue(
            "T2",
            Category::MutualFund,
            "Purchase Failed",
            "Unable to purchase Mutual Fund",
        ),
        issue(
            "T3",
            Category::Payment,
            "Payment Failed",
            "My payment failed but money is debited",
        ),
    ]
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;
