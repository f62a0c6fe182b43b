// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn raise(registry: &mut IssueRegistry, txn: &str, category: Category) -> IssueId {
    registry
        .create_issue(txn, category, "Payment Failed", "money debited", "user@test.com")
        .unwrap()
}

#[test]
fn create_issue_files_it_as_open() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Payment);

    let issue = registry.get(&id).unwrap();
    assert_eq!(issue.status(), IssueStatus::Open);
    assert_eq!(issue.transaction_id, "T1");
    assert_eq!(registry.issues_by_status(IssueStatus::Open).len(), 1);
    assert!(registry.issues_by_status(IssueStatus::Waiting).is_empty());
    registry.assert_consistent();
}

#[test]
fn issues_with_same_subject_get_distinct_ids() {
    let mut registry = IssueRegistry::new();
    let ids: Vec<_> = (0..20)
        .map(|i| raise(&mut registry, &format!("T{}", i), Category::Payment))
        .collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(registry.len(), 20);
}

#[parameterized(
    empty_transaction = { "", "Subject", "user@test.com" },
    empty_subject = { "T1", "  ", "user@test.com" },
    empty_raiser = { "T1", "Subject", "" },
)]
fn create_issue_rejects_blank_fields(txn: &str, subject: &str, raiser: &str) {
    let mut registry = IssueRegistry::new();
    let err = registry
        .create_issue(txn, Category::Gold, subject, "details", raiser)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(registry.is_empty());
}

#[test]
fn lookup_of_unknown_issue_is_absent() {
    let registry = IssueRegistry::new();
    assert!(registry.get("iss-missing").is_none());
    assert!(!registry.contains("iss-missing"));
}

#[test]
fn update_of_unknown_issue_is_not_found() {
    let mut registry = IssueRegistry::new();
    let err = registry
        .update_status("iss-missing", IssueStatus::Waiting, None)
        .unwrap_err();
    assert!(matches!(err, Error::IssueNotFound(_)));
}

#[test]
fn status_change_moves_issue_between_index_buckets() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Payment);

    registry
        .update_status(&id, IssueStatus::Resolved, Some("Refunded"))
        .unwrap();

    assert!(registry.issues_by_status(IssueStatus::Open).is_empty());
    let resolved = registry.issues_by_status(IssueStatus::Resolved);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].resolution(), Some("Refunded"));
    registry.assert_consistent();
}

#[test]
fn failed_update_leaves_index_untouched() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Payment);

    assert!(registry
        .update_status(&id, IssueStatus::Resolved, None)
        .is_err());

    assert_eq!(registry.issues_by_status(IssueStatus::Open).len(), 1);
    registry.assert_consistent();
}

#[test]
fn waitlist_is_fifo() {
    let mut registry = IssueRegistry::new();
    let first = raise(&mut registry, "T1", Category::Gold);
    let second = raise(&mut registry, "T2", Category::Gold);

    registry.add_to_waitlist(&first).unwrap();
    registry.add_to_waitlist(&second).unwrap();

    assert_eq!(registry.waitlist().collect::<Vec<_>>(), [first.as_str(), second.as_str()]);
    assert_eq!(registry.next_waiting(), Some(first));
    assert_eq!(registry.next_waiting(), Some(second));
    assert_eq!(registry.next_waiting(), None);
}

#[test]
fn waitlisting_twice_keeps_single_entry() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Gold);

    registry.add_to_waitlist(&id).unwrap();
    registry.add_to_waitlist(&id).unwrap();

    assert_eq!(registry.waitlist_len(), 1);
    assert_eq!(registry.get(&id).unwrap().status(), IssueStatus::Waiting);
    registry.assert_consistent();
}

#[test]
fn resolved_issue_cannot_be_waitlisted() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Gold);
    registry
        .update_status(&id, IssueStatus::Resolved, Some("Closed by customer"))
        .unwrap();

    let err = registry.add_to_waitlist(&id).unwrap_err();

    assert!(matches!(err, Error::NotAssignable { .. }));
    assert_eq!(registry.waitlist_len(), 0);
}

#[test]
fn leaving_waiting_drops_waitlist_entry() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Gold);
    registry.add_to_waitlist(&id).unwrap();
    registry.record_wait_pass(&id);

    registry
        .update_status(&id, IssueStatus::Resolved, Some("Withdrawn"))
        .unwrap();

    assert!(!registry.is_waitlisted(&id));
    assert_eq!(registry.wait_passes(&id), 0);
    registry.assert_consistent();
}

#[test]
fn retry_counter_counts_and_clears() {
    let mut registry = IssueRegistry::new();
    let id = raise(&mut registry, "T1", Category::Payment);

    assert_eq!(registry.retry_count(&id), 0);
    assert_eq!(registry.record_retry(&id), 1);
    assert_eq!(registry.record_retry(&id), 2);
    registry.clear_retries(&id);
    assert_eq!(registry.retry_count(&id), 0);
}

#[test]
fn filter_combines_criteria() {
    let mut registry = IssueRegistry::new();
    let payment = raise(&mut registry, "T1", Category::Payment);
    let gold = raise(&mut registry, "T2", Category::Gold);
    registry
        .create_issue("T3", Category::Payment, "Refund", "late", "other@test.com")
        .unwrap();
    registry.add_to_waitlist(&gold).unwrap();

    let by_category = registry.issues_matching(&IssueFilter::default().category(Category::Payment));
    assert_eq!(by_category.len(), 2);

    let mine = registry.issues_matching(
        &IssueFilter::default()
            .category(Category::Payment)
            .raised_by("USER@test.com"),
    );
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, payment);

    let waiting = registry.issues_matching(&IssueFilter::default().status(IssueStatus::Waiting));
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].id, gold);

    let by_txn = registry.issues_matching(&IssueFilter::default().transaction_id("T3"));
    assert_eq!(by_txn.len(), 1);

    assert_eq!(registry.issues_matching(&IssueFilter::default()).len(), 3);
}
