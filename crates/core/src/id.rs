// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque identifiers for issues and agents.
//!
//! An id is `{prefix}-{8 hex}`: the first four bytes of a SHA-256 over the
//! record's identifying fields and its creation instant. Issues hash their
//! raiser, transaction, category and subject; agents hash their email.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Prefix for issue identifiers.
pub const ISSUE_PREFIX: &str = "iss";
/// Prefix for agent identifiers.
pub const AGENT_PREFIX: &str = "agt";

/// Identifier of an [`Issue`](crate::Issue).
pub type IssueId = String;
/// Identifier of an [`Agent`](crate::Agent).
pub type AgentId = String;

/// Derives the base id for a record. Fields are NUL-separated before hashing
/// so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn derive_id(prefix: &str, fields: &[&str], created_at: &DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(created_at.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
    let digest = hasher.finalize();
    format!("{}-{}", prefix, hex::encode(&digest[..4]))
}

/// Derives an id that `taken` rejects for no existing record.
///
/// A taken base id gets `-2`, `-3`, ... until a free one is found.
pub fn derive_unique_id<F>(
    prefix: &str,
    fields: &[&str],
    created_at: &DateTime<Utc>,
    taken: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base = derive_id(prefix, fields, created_at);
    let mut id = base.clone();
    let mut n = 2u32;
    while taken(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    id
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
