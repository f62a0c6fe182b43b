// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dk_core::{Issue, IssueStatus, WorkHistory};

/// Status order of the end-of-run summary.
pub const SUMMARY_ORDER: [IssueStatus; 4] = [
    IssueStatus::Open,
    IssueStatus::InProgress,
    IssueStatus::Resolved,
    IssueStatus::Waiting,
];

/// One line per agent: `Agent <name> worked on: <ids>`.
pub fn format_work_history(history: &[WorkHistory]) -> Vec<String> {
    history
        .iter()
        .map(|h| {
            format!(
                "Agent {} worked on: {}",
                h.agent_name,
                format_ids(h.issues.iter().map(String::as_str))
            )
        })
        .collect()
}

/// Format an issue for list output.
///
/// Output: `- [Payment Related] (in_progress, @agt-1a2b3c4d) iss-5e6f7a8b: Payment Failed (T1)`
pub fn format_issue_line(issue: &Issue) -> String {
    let status_display = match issue.assigned_agent() {
        Some(agent) if issue.status() == IssueStatus::InProgress => {
            format!("{}, @{}", issue.status(), agent)
        }
        _ => issue.status().to_string(),
    };
    format!(
        "- [{}] ({}) {}: {} ({})",
        issue.category.label(),
        status_display,
        issue.id,
        issue.subject,
        issue.transaction_id
    )
}

/// Header line for one status group, followed by its issue lines.
pub fn format_status_group(status: IssueStatus, issues: &[Issue]) -> Vec<String> {
    let mut lines = Vec::with_capacity(issues.len() + 1);
    lines.push(format!(
        "Issues with status {}: {}",
        status,
        format_ids(issues.iter().map(|i| i.id.as_str()))
    ));
    lines.extend(issues.iter().map(|i| format!("  {}", format_issue_line(i))));
    lines
}

fn format_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let ids: Vec<_> = ids.collect();
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.join(", ")
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
