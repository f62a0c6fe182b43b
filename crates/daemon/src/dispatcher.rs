// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background waitlist dispatcher.
//!
//! Ticks on a fixed interval and runs one drain pass per tick. Shutdown is
//! signalled over a oneshot; a pass already running completes first.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::Result;
use crate::state::DeskState;

pub struct Dispatcher;

/// Owner of a running dispatcher. Dropping it also stops the task.
pub struct DispatcherHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<u64>,
}

impl Dispatcher {
    /// Spawns the dispatcher. The first pass runs one `every` after start.
    pub fn start(state: DeskState, every: Duration) -> DispatcherHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut passes = 0u64;

            tracing::info!("dispatcher started, draining every {:?}", every);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let report = state.drain_waitlist().await;
                        passes += 1;
                        if !report.escalated.is_empty() {
                            tracing::warn!(
                                escalated = ?report.escalated,
                                "issues waiting beyond the escalation threshold"
                            );
                        }
                        tracing::debug!(pass = passes, attempted = report.attempted, "drain pass complete");
                    }
                }
            }
            tracing::info!(passes, "dispatcher stopped");
            passes
        });

        DispatcherHandle { shutdown_tx, task }
    }
}

impl DispatcherHandle {
    /// Stops ticking, waits for an in-flight pass, and returns the pass count.
    pub async fn shutdown(self) -> Result<u64> {
        // The task may already have exited; the join below still reports it.
        let _ = self.shutdown_tx.send(());
        Ok(self.task.await?)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
