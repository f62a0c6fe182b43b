// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Customers who raise issues.

use serde::{Deserialize, Serialize};

use crate::desk::Desk;
use crate::error::{Error, Result};
use crate::id::IssueId;
use crate::issue::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(email: &str, name: &str) -> Result<Self> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(Error::InvalidInput(format!(
                "'{}' is not an email address",
                email
            )));
        }
        Ok(User {
            email: email.to_string(),
            name: name.trim().to_string(),
        })
    }

    /// Raises an issue on `desk` on behalf of this user.
    pub fn raise_issue(
        &self,
        desk: &mut Desk,
        transaction_id: &str,
        category: Category,
        subject: &str,
        description: &str,
    ) -> Result<IssueId> {
        let id = desk.create_issue(transaction_id, category, subject, description, &self.email)?;
        tracing::info!(issue = %id, "{} raised issue with subject '{}'", self.name, subject);
        Ok(id)
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
