// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

fn desk_with_agents(agents: &[(&str, Category)]) -> Desk {
    let mut desk = Desk::default();
    for (email, category) in agents {
        desk.add_agent(email, email, [*category]).unwrap();
    }
    desk
}

#[tokio::test]
async fn concurrent_raises_all_land() {
    let state = DeskState::new(Desk::default());

    let mut tasks = Vec::new();
    for n in 0..8 {
        let state = state.clone();
        tasks.push(tokio::spawn(async move {
            let user = User::new(&format!("user{n}@test.com"), "User").unwrap();
            let mut ids = Vec::new();
            for t in 0..5 {
                let id = state
                    .raise_issue(&user, &format!("T{n}-{t}"), Category::Gold, "Gold", "")
                    .await
                    .unwrap();
                ids.push(id);
            }
            ids
        }));
    }
    let mut ids = Vec::new();
    for task in tasks {
        ids.extend(task.await.unwrap());
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 40);
    assert_eq!(state.issues_by_status(IssueStatus::Open).await.len(), 40);
}

#[tokio::test]
async fn assignment_and_resolution_through_state() {
    let state = DeskState::new(desk_with_agents(&[("a@desk.io", Category::Payment)]));
    let user = User::new("user@test.com", "User").unwrap();
    let first = state
        .raise_issue(&user, "T1", Category::Payment, "Payment Failed", "")
        .await
        .unwrap();
    let second = state
        .raise_issue(&user, "T3", Category::Payment, "Payment Failed", "")
        .await
        .unwrap();

    assert!(matches!(
        state.try_assign(&first).await.unwrap(),
        Assignment::Assigned { .. }
    ));
    assert_eq!(state.try_assign(&second).await.unwrap(), Assignment::Queued);
    assert_eq!(state.waitlist().await, vec![second.clone()]);

    let busy = state.busy_agents().await;
    assert_eq!(busy.len(), 1);
    let resolved = state
        .resolve_current_issue(&busy[0], "Refunded")
        .await
        .unwrap();
    assert_eq!(resolved, first);

    let report = state.drain_waitlist().await;
    assert_eq!(report.assigned, vec![(second, busy[0].clone())]);
    assert!(state.waitlist().await.is_empty());
    assert_eq!(state.work_history().await[0].issues.len(), 2);
}

#[tokio::test]
async fn concurrent_resolutions_free_every_agent() {
    let state = DeskState::new(desk_with_agents(&[
        ("a@desk.io", Category::Payment),
        ("b@desk.io", Category::Payment),
        ("c@desk.io", Category::Payment),
    ]));
    let user = User::new("user@test.com", "User").unwrap();
    for t in 0..3 {
        let id = state
            .raise_issue(&user, &format!("T{t}"), Category::Payment, "Payment", "")
            .await
            .unwrap();
        state.try_assign(&id).await.unwrap();
    }

    let mut tasks = Vec::new();
    for agent in state.busy_agents().await {
        let state = state.clone();
        tasks.push(tokio::spawn(async move {
            state.resolve_current_issue(&agent, "Done").await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert!(state.busy_agents().await.is_empty());
    assert_eq!(state.issues_by_status(IssueStatus::Resolved).await.len(), 3);
    assert!(state.work_history().await.iter().all(|h| h.issues.len() == 1));
}

#[tokio::test]
async fn desk_errors_pass_through() {
    let state = DeskState::new(Desk::default());
    let err = state.resolve_current_issue("agt-missing", "x").await.unwrap_err();
    assert!(matches!(
        err,
        crate::error::Error::Desk(dk_core::Error::AgentNotFound(_))
    ));
}
