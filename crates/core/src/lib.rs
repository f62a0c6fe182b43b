// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dk-core: assignment engine for the desk support-ticket router.
//!
//! This crate provides the issue and agent state machines, the registries
//! that own them, and the engine that routes issues to free, qualified
//! agents or parks them on a waitlist. It performs no I/O; the `deskd`
//! daemon wraps a [`Desk`] in a lock and drives it.

pub mod agent;
pub mod agent_registry;
pub mod desk;
pub mod engine;
pub mod error;
pub mod id;
pub mod issue;
pub mod issue_registry;
pub mod user;

pub use agent::{Agent, AgentStatus};
pub use agent_registry::{AgentRegistry, WorkHistory};
pub use desk::Desk;
pub use engine::{
    Assignment, AssignmentEngine, AssignmentStrategy, DrainReport, EngineConfig, LeastLoaded,
    DEFAULT_MAX_RETRIES,
};
pub use error::{Error, Result};
pub use id::{AgentId, IssueId};
pub use issue::{Category, Issue, IssueStatus};
pub use issue_registry::{IssueFilter, IssueRegistry};
pub use user::User;
