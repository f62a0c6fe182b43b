// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! deskd - runs a support desk against seed data.
//!
//! Registers the seeded agents, has the users raise their issues, routes
//! them, lets busy agents resolve, then keeps a waitlist dispatcher running
//! until Ctrl-C (or `--run-for-ms`) before printing a summary.
//!
//! Usage:
//!   deskd --seed <path> [--config <path>] [--run-for-ms <n>]

mod config;
mod dispatcher;
mod display;
mod env;
mod error;
mod scenario;
mod seed;
mod state;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dk_core::Desk;

use config::Config;
use dispatcher::Dispatcher;
use error::Result;
use seed::Seed;
use state::DeskState;

const DEFAULT_RESOLUTION: &str = "Issue resolved by refunding the amount";

/// deskd: support-ticket assignment desk
#[derive(Parser, Debug)]
#[command(name = "deskd")]
#[command(about = "Routes customer issues to qualified agents")]
struct Args {
    /// Seed file with agents, users and issues (JSON)
    #[arg(short, long)]
    seed: PathBuf,

    /// Config file (defaults to $DESK_CONFIG, then <config_dir>/desk/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dispatcher tick in milliseconds, overrides the config file
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop after this many milliseconds instead of waiting for Ctrl-C
    #[arg(long)]
    run_for_ms: Option<u64>,

    /// Resolution text agents record when resolving
    #[arg(long, default_value = DEFAULT_RESOLUTION)]
    resolution: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(env::names::RUST_LOG).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(ms) = args.interval_ms.or_else(env::dispatch_interval_ms) {
        config = config.with_dispatch_interval_ms(ms)?;
    }

    let seed = Seed::load(&args.seed)?;
    let workloads = seed.workloads()?;
    let mut desk = Desk::new(config.engine_config());
    let agents = seed.register_agents(&mut desk)?;
    tracing::info!(
        agents = agents.len(),
        users = seed.users.len(),
        "desk ready, max_retries={}",
        config.max_retries
    );

    let state = DeskState::new(desk);
    let raised = scenario::raise_all(&state, workloads).await?;
    let outcomes = scenario::assign_all(&state, &raised).await?;
    let placed = outcomes.iter().filter(|o| o.agent_id().is_some()).count();
    tracing::info!(
        raised = raised.len(),
        assigned = placed,
        waiting = raised.len() - placed,
        "initial routing done"
    );
    scenario::resolve_busy(&state, &args.resolution).await?;

    let dispatcher = Dispatcher::start(state.clone(), config.dispatch_interval());
    wait_for_stop(args.run_for_ms.map(Duration::from_millis)).await?;
    let passes = dispatcher.shutdown().await?;
    tracing::info!(passes, "shut down");

    for line in display::format_work_history(&state.work_history().await) {
        println!("{}", line);
    }
    for status in display::SUMMARY_ORDER {
        let issues = state.issues_by_status(status).await;
        for line in display::format_status_group(status, &issues) {
            println!("{}", line);
        }
    }
    let waiting = state.waitlist().await;
    if !waiting.is_empty() {
        tracing::warn!("{} issue(s) still waiting for an agent", waiting.len());
    }
    Ok(())
}

/// Returns on Ctrl-C, or once `limit` has elapsed if one is given.
async fn wait_for_stop(limit: Option<Duration>) -> Result<()> {
    match limit {
        Some(limit) => {
            tokio::select! {
                _ = tokio::time::sleep(limit) => {}
                signal = tokio::signal::ctrl_c() => signal?,
            }
        }
        None => {
            tracing::info!("running until Ctrl-C");
            tokio::signal::ctrl_c().await?;
        }
    }
    Ok(())
}
