// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use dk_core::IssueStatus;
use tempfile::TempDir;

const SEED: &str = r#"{
  "agents": [
    {"email": "agent1@test.com", "name": "Agent One", "expertise": ["payment", "gold"]},
    {"email": "agent2@test.com", "name": "Agent Two", "expertise": ["mutual-fund"]}
  ],
  "users": [
    {"email": "user1@test.com", "name": "User One"},
    {"email": "user2@test.com", "name": "User Two"}
  ]
}"#;

fn parse(json: &str) -> Seed {
    serde_json::from_str(json).unwrap()
}

#[test]
fn load_reads_agents_and_users() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("seed.json");
    fs::write(&path, SEED).unwrap();

    let seed = Seed::load(&path).unwrap();

    assert_eq!(seed.agents.len(), 2);
    assert_eq!(seed.agents[1].expertise, vec![Category::MutualFund]);
    assert_eq!(seed.users.len(), 2);
    assert!(seed.issues.is_none());
}

#[test]
fn load_reports_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Seed::load(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn load_reports_malformed_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("seed.json");
    fs::write(&path, r#"{"agents": [{"email": "a@test.com"}]}"#).unwrap();

    let err = Seed::load(&path).unwrap_err();

    assert!(matches!(err, Error::SeedFormat { .. }));
}

#[test]
fn unknown_category_is_a_format_error() {
    let result = serde_json::from_str::<Seed>(
        r#"{"agents": [{"email": "a@test.com", "name": "A", "expertise": ["crypto"]}]}"#,
    );
    assert!(result.is_err());
}

#[test]
fn register_agents_adds_them_in_order() {
    let seed = parse(SEED);
    let mut desk = Desk::default();

    let ids = seed.register_agents(&mut desk).unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(desk.agent(&ids[0]).unwrap().name, "Agent One");
    assert!(desk.agent(&ids[1]).unwrap().handles(Category::MutualFund));
}

#[test]
fn agent_without_expertise_is_rejected() {
    let seed = parse(r#"{"agents": [{"email": "a@test.com", "name": "A", "expertise": []}]}"#);
    let err = seed.register_agents(&mut Desk::default()).unwrap_err();
    assert!(matches!(err, Error::Desk(dk_core::Error::EmptyExpertise(_))));
}

#[test]
fn duplicate_users_are_rejected() {
    let seed = parse(
        r#"{"users": [{"email": "u@test.com", "name": "U"}, {"email": "U@test.com", "name": "U2"}]}"#,
    );
    assert!(matches!(seed.users().unwrap_err(), Error::Seed(_)));
}

#[test]
fn absent_issues_fall_back_to_demo_issues() {
    let workloads = parse(SEED).workloads().unwrap();

    assert_eq!(workloads.len(), 1);
    assert_eq!(workloads[0].user.email, "user1@test.com");
    let txns: Vec<_> = workloads[0]
        .issues
        .iter()
        .map(|i| i.transaction_id.as_str())
        .collect();
    assert_eq!(txns, ["T1", "T2", "T3"]);
}

#[test]
fn empty_issue_list_raises_nothing() {
    let seed = parse(r#"{"users": [{"email": "u@test.com", "name": "U"}], "issues": []}"#);
    assert!(seed.workloads().unwrap().is_empty());
}

#[test]
fn issues_are_grouped_by_user() {
    let seed = parse(
        r#"{
          "users": [{"email": "a@test.com", "name": "A"}, {"email": "b@test.com", "name": "B"}],
          "issues": [
            {"raised_by": "b@test.com", "transaction_id": "T1", "category": "gold", "subject": "Gold"},
            {"raised_by": "A@test.com", "transaction_id": "T2", "category": "payment", "subject": "Pay"},
            {"raised_by": "b@test.com", "transaction_id": "T3", "category": "insurance", "subject": "Claim"}
          ]
        }"#,
    );

    let workloads = seed.workloads().unwrap();

    assert_eq!(workloads.len(), 2);
    assert_eq!(workloads[0].user.email, "a@test.com");
    assert_eq!(workloads[0].issues.len(), 1);
    assert_eq!(workloads[1].issues[0].transaction_id, "T1");
    assert_eq!(workloads[1].issues[1].transaction_id, "T3");
    assert_eq!(workloads[1].issues[1].description, "");
}

#[test]
fn issue_from_unlisted_user_is_rejected() {
    let seed = parse(
        r#"{
          "users": [{"email": "a@test.com", "name": "A"}],
          "issues": [{"raised_by": "ghost@test.com", "transaction_id": "T1", "category": "gold", "subject": "Gold"}]
        }"#,
    );

    let err = seed.workloads().unwrap_err();

    assert!(matches!(err, Error::UnknownUser(ref email) if email == "ghost@test.com"));
}

#[test]
fn demo_issues_can_be_raised() {
    let mut desk = Desk::default();
    let user = User::new("user@test.com", "User").unwrap();
    for issue in demo_issues(&user.email) {
        user.raise_issue(
            &mut desk,
            &issue.transaction_id,
            issue.category,
            &issue.subject,
            &issue.description,
        )
        .unwrap();
    }
    assert_eq!(desk.issues_by_status(IssueStatus::Open).len(), 3);
}
